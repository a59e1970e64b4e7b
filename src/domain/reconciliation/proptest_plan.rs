//! Property-based tests for the reconciliation plan.
//!
//! The plan is applied to the local snapshot the way a fully successful
//! directory would, then checked against the remote set.

use proptest::prelude::*;

use super::plan::{ReconcileOp, ReconciliationPlan};
use super::snapshot::{LocalMemberSnapshot, RemoteMemberSet};
use crate::domain::foundation::{ExternalId, MemberId};
use crate::domain::member::{Member, MemberStatus, PersonName};

/// Small id space so remote and local overlap often.
fn member_id() -> impl Strategy<Value = i64> {
    1i64..40
}

/// Few names so unchanged members are common.
fn person_name() -> impl Strategy<Value = PersonName> {
    (
        prop::sample::select(vec!["Ada", "Grace", "Linus"]),
        prop::sample::select(vec!["", "Hopper", "Lovelace"]),
    )
        .prop_map(|(first, last)| PersonName::new(first, last))
}

fn member_status() -> impl Strategy<Value = MemberStatus> {
    prop::sample::select(vec![
        MemberStatus::NotActive,
        MemberStatus::Active,
        MemberStatus::Deactivated,
    ])
}

fn remote_strategy() -> impl Strategy<Value = RemoteMemberSet> {
    prop::collection::btree_map(member_id(), person_name(), 0..20).prop_map(|members| {
        let mut set = RemoteMemberSet::new();
        for (id, name) in members {
            set.insert(MemberId::new(id), name);
        }
        set
    })
}

/// Local snapshot with unique source ids.
fn local_strategy() -> impl Strategy<Value = LocalMemberSnapshot> {
    prop::collection::btree_map(member_id(), (person_name(), member_status()), 0..20).prop_map(
        |members| {
            let mut snapshot = LocalMemberSnapshot::new();
            for (id, (name, status)) in members {
                let external_id = ExternalId::new(format!("ua-{}", id)).unwrap();
                snapshot.insert(
                    external_id,
                    Member::new(MemberId::new(id), name).with_status(status),
                );
            }
            snapshot
        },
    )
}

/// Applies every operation as a directory that never fails would.
fn apply(plan: &ReconciliationPlan, local: &LocalMemberSnapshot) -> LocalMemberSnapshot {
    let mut next = local.clone();
    for op in plan.operations() {
        match op {
            ReconcileOp::Update {
                external_id,
                member,
            } => next.insert(external_id.clone(), member.clone()),
            ReconcileOp::Add { member } => {
                let external_id = ExternalId::new(format!("new-{}", member.id)).unwrap();
                next.insert(external_id, member.clone());
            }
            ReconcileOp::Disable {
                external_id,
                member,
            } => next.insert(
                external_id.clone(),
                member.clone().with_status(MemberStatus::Deactivated),
            ),
        }
    }
    next
}

proptest! {
    /// Property: A second run against the reconciled snapshot is a no-op.
    #[test]
    fn prop_second_run_is_empty(remote in remote_strategy(), local in local_strategy()) {
        let plan = ReconciliationPlan::compute(&remote, &local);
        let reconciled = apply(&plan, &local);

        let second = ReconciliationPlan::compute(&remote, &reconciled);
        prop_assert!(second.is_empty(), "unexpected second plan: {:?}", second);
    }

    /// Property: After reconciliation the Active entries are exactly the
    /// remote identities.
    #[test]
    fn prop_active_entries_cover_remote(remote in remote_strategy(), local in local_strategy()) {
        let plan = ReconciliationPlan::compute(&remote, &local);
        let reconciled = apply(&plan, &local);

        prop_assert_eq!(reconciled.active_identities(), remote.identities());
    }

    /// Property: Disable is only ever issued for Active entries.
    #[test]
    fn prop_disable_targets_only_active(remote in remote_strategy(), local in local_strategy()) {
        let plan = ReconciliationPlan::compute(&remote, &local);

        for op in &plan.disables {
            let ReconcileOp::Disable { external_id, .. } = op else {
                return Err(TestCaseError::fail("non-disable op in disables"));
            };
            let observed = local.get(external_id).map(|m| m.status);
            prop_assert_eq!(observed, Some(MemberStatus::Active));
        }
    }

    /// Property: Updates always reuse the external id already observed for
    /// that source id.
    #[test]
    fn prop_updates_keep_external_id(remote in remote_strategy(), local in local_strategy()) {
        let plan = ReconciliationPlan::compute(&remote, &local);

        for op in &plan.updates {
            let ReconcileOp::Update { external_id, member } = op else {
                return Err(TestCaseError::fail("non-update op in updates"));
            };
            let observed = local.get(external_id).map(|m| m.id);
            prop_assert_eq!(observed, Some(member.id));
            prop_assert_eq!(member.external_id.as_ref(), Some(external_id));
        }
    }

    /// Property: Adds are only issued for source ids the directory lacks.
    #[test]
    fn prop_adds_are_for_unknown_ids(remote in remote_strategy(), local in local_strategy()) {
        let plan = ReconciliationPlan::compute(&remote, &local);
        let index = local.index_by_source_id();

        for op in &plan.adds {
            prop_assert!(!index.contains_key(&op.member().id));
        }
    }
}
