//! Reconciliation handlers.
//!
//! - `ReconciliationEngine` - One pass: list, diff, apply
//! - `ReconciliationScheduler` - Periodic single-flight runner

mod reconciliation_engine;
mod reconciliation_scheduler;

pub use reconciliation_engine::{ReconcileError, ReconcileSummary, ReconciliationEngine};
pub use reconciliation_scheduler::ReconciliationScheduler;
