//! Reconciliation domain module.
//!
//! Pure diffing of the desired member set against the observed directory.

mod plan;
mod snapshot;

#[cfg(test)]
mod proptest_plan;

pub use plan::{OperationKind, ReconcileOp, ReconciliationPlan};
pub use snapshot::{LocalMemberSnapshot, RemoteMemberSet};
