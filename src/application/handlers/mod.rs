//! Application handlers.
//!
//! Handlers that orchestrate domain operations across ports.

pub mod reconciliation;
pub mod webhook;

pub use reconciliation::{
    ReconcileError, ReconcileSummary, ReconciliationEngine, ReconciliationScheduler,
};
pub use webhook::{WebhookOutcome, WebhookProcessor};
