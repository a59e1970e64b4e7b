//! Pure reconciliation diff.
//!
//! Computing the plan performs no I/O. Applying it is the job of
//! `ReconciliationEngine` in the application layer.

use std::fmt;

use crate::domain::foundation::ExternalId;
use crate::domain::member::{Member, MemberStatus};

use super::{LocalMemberSnapshot, RemoteMemberSet};

/// Kind of directory operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Update,
    Add,
    Disable,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationKind::Update => "update",
            OperationKind::Add => "add",
            OperationKind::Disable => "disable",
        };
        f.write_str(s)
    }
}

/// A single directory operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOp {
    /// Rewrite an existing entry with the remote member's fields.
    Update { external_id: ExternalId, member: Member },

    /// Create a new entry.
    Add { member: Member },

    /// Disable an entry whose member left the remote set.
    Disable { external_id: ExternalId, member: Member },
}

impl ReconcileOp {
    pub fn kind(&self) -> OperationKind {
        match self {
            ReconcileOp::Update { .. } => OperationKind::Update,
            ReconcileOp::Add { .. } => OperationKind::Add,
            ReconcileOp::Disable { .. } => OperationKind::Disable,
        }
    }

    pub fn member(&self) -> &Member {
        match self {
            ReconcileOp::Update { member, .. }
            | ReconcileOp::Add { member }
            | ReconcileOp::Disable { member, .. } => member,
        }
    }

    pub fn external_id(&self) -> Option<&ExternalId> {
        match self {
            ReconcileOp::Update { external_id, .. } | ReconcileOp::Disable { external_id, .. } => {
                Some(external_id)
            }
            ReconcileOp::Add { .. } => None,
        }
    }
}

/// The minimal set of operations aligning a local snapshot with a remote
/// set, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationPlan {
    pub updates: Vec<ReconcileOp>,
    pub adds: Vec<ReconcileOp>,
    pub disables: Vec<ReconcileOp>,
}

impl ReconciliationPlan {
    /// Diffs `remote` (desired) against `local` (observed).
    ///
    /// - Identical identity sets short-circuit to an empty plan.
    /// - A remote member not identically present locally is an Update
    ///   when its source id is known, carrying the existing external id,
    ///   and an Add otherwise. Known ids take the Update path whatever
    ///   their status, which is how a Deactivated member returns.
    /// - A local member missing from remote is disabled only while Active.
    pub fn compute(remote: &RemoteMemberSet, local: &LocalMemberSnapshot) -> Self {
        let local_identities = local.identities();
        let remote_identities = remote.identities();
        if remote_identities == local_identities {
            return Self::default();
        }

        let index = local.index_by_source_id();
        let mut plan = Self::default();

        for member in remote.iter() {
            if local_identities.contains(&member.identity()) {
                continue;
            }

            match index.get(&member.id) {
                Some((external_id, _)) => plan.updates.push(ReconcileOp::Update {
                    external_id: (*external_id).clone(),
                    member: member.clone().with_external_id((*external_id).clone()),
                }),
                None => plan.adds.push(ReconcileOp::Add {
                    member: member.clone(),
                }),
            }
        }

        for (external_id, member) in local.iter() {
            if remote.contains(member.id) {
                continue;
            }
            if member.status == MemberStatus::Active {
                plan.disables.push(ReconcileOp::Disable {
                    external_id: external_id.clone(),
                    member: member.clone(),
                });
            }
        }

        plan
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.adds.is_empty() && self.disables.is_empty()
    }

    pub fn len(&self) -> usize {
        self.updates.len() + self.adds.len() + self.disables.len()
    }

    /// Operations in apply order: updates, then adds, then disables.
    pub fn operations(&self) -> impl Iterator<Item = &ReconcileOp> {
        self.updates
            .iter()
            .chain(self.adds.iter())
            .chain(self.disables.iter())
    }
}
