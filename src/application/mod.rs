//! Application layer - Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The webhook path mutates members one event at a time; the reconciliation
//! path aligns the whole directory in a single pass.

pub mod handlers;

pub use handlers::{
    // Reconciliation
    ReconcileError, ReconcileSummary, ReconciliationEngine, ReconciliationScheduler,
    // Webhooks
    WebhookOutcome, WebhookProcessor,
};
