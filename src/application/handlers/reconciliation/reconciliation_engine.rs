//! ReconciliationEngine - Applies the reconciliation plan to the directory.
//!
//! One sequential pass per call: compute the plan, then apply updates,
//! adds, and disables in that order. A failed operation is logged and
//! counted; the pass continues and reports the last failure at the end.
//!
//! Callers must not run two passes against the same directory at once.
//! `ReconciliationScheduler` provides that guarantee.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::foundation::DomainError;
use crate::domain::reconciliation::{
    LocalMemberSnapshot, OperationKind, ReconcileOp, ReconciliationPlan, RemoteMemberSet,
};
use crate::ports::{AccessControlUpdater, MemberSnapshotSource, RemoteMemberSource};

/// Counts of applied and failed operations for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub updated: usize,
    pub added: usize,
    pub disabled: usize,
    pub failed: usize,
}

impl ReconcileSummary {
    fn record(&mut self, kind: OperationKind) {
        match kind {
            OperationKind::Update => self.updated += 1,
            OperationKind::Add => self.added += 1,
            OperationKind::Disable => self.disabled += 1,
        }
    }

    /// Operations that succeeded.
    pub fn applied(&self) -> usize {
        self.updated + self.added + self.disabled
    }

    /// True when the pass issued no operations at all.
    pub fn is_noop(&self) -> bool {
        self.applied() == 0 && self.failed == 0
    }
}

/// Errors from a reconciliation pass.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Desired state could not be listed. Nothing was applied.
    #[error("failed to list remote members: {0}")]
    RemoteSource(#[source] DomainError),

    /// Observed state could not be listed. Nothing was applied.
    #[error("failed to list directory members: {0}")]
    LocalSnapshot(#[source] DomainError),

    /// At least one operation failed. The rest were still applied.
    #[error("{} reconciliation operations failed, last error: {last}", .summary.failed)]
    Apply {
        summary: ReconcileSummary,
        #[source]
        last: DomainError,
    },
}

/// Computes and applies the minimal directory operations.
pub struct ReconciliationEngine {
    remote: Arc<dyn RemoteMemberSource>,
    local: Arc<dyn MemberSnapshotSource>,
    updater: Arc<dyn AccessControlUpdater>,
}

impl ReconciliationEngine {
    pub fn new(
        remote: Arc<dyn RemoteMemberSource>,
        local: Arc<dyn MemberSnapshotSource>,
        updater: Arc<dyn AccessControlUpdater>,
    ) -> Self {
        Self {
            remote,
            local,
            updater,
        }
    }

    /// Lists both sides, then reconciles them.
    pub async fn run_once(&self) -> Result<ReconcileSummary, ReconcileError> {
        let remote = self
            .remote
            .list_members()
            .await
            .map_err(ReconcileError::RemoteSource)?;
        let local = self
            .local
            .list()
            .await
            .map_err(ReconcileError::LocalSnapshot)?;

        debug!(
            remote = remote.len(),
            local = local.len(),
            "listed members for reconciliation"
        );

        self.reconcile(&remote, &local).await
    }

    /// Aligns the directory with `remote`, given its observed state `local`.
    pub async fn reconcile(
        &self,
        remote: &RemoteMemberSet,
        local: &LocalMemberSnapshot,
    ) -> Result<ReconcileSummary, ReconcileError> {
        let plan = ReconciliationPlan::compute(remote, local);
        let mut summary = ReconcileSummary::default();

        if plan.is_empty() {
            debug!("directory already matches remote members");
            return Ok(summary);
        }

        info!(
            updates = plan.updates.len(),
            adds = plan.adds.len(),
            disables = plan.disables.len(),
            "applying reconciliation plan"
        );

        let mut last_error = None;
        for op in plan.operations() {
            match self.apply(op).await {
                Ok(()) => summary.record(op.kind()),
                Err(e) => {
                    warn!(
                        operation = %op.kind(),
                        member_id = %op.member().id,
                        error = %e,
                        "reconciliation operation failed"
                    );
                    summary.failed += 1;
                    last_error = Some(e);
                }
            }
        }

        info!(
            updated = summary.updated,
            added = summary.added,
            disabled = summary.disabled,
            failed = summary.failed,
            "reconciliation pass finished"
        );

        match last_error {
            Some(last) => Err(ReconcileError::Apply { summary, last }),
            None => Ok(summary),
        }
    }

    async fn apply(&self, op: &ReconcileOp) -> Result<(), DomainError> {
        match op {
            ReconcileOp::Update {
                external_id,
                member,
            } => {
                self.updater.update_member(external_id, member).await?;
                info!(member_id = %member.id, external_id = %external_id, name = %member.name, "updated member");
            }
            ReconcileOp::Add { member } => {
                let external_id = self.updater.add_member(member).await?;
                info!(member_id = %member.id, external_id = %external_id, name = %member.name, "added member");
            }
            ReconcileOp::Disable {
                external_id,
                member,
            } => {
                self.updater.disable_member(external_id, member).await?;
                info!(member_id = %member.id, external_id = %external_id, name = %member.name, "disabled member");
            }
        }
        Ok(())
    }
}
