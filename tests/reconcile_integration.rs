//! Integration tests for directory reconciliation.
//!
//! Runs the engine against the in-memory directory and member source and
//! checks that the directory converges on the member list.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use member_sync::adapters::{DryRunDirectory, InMemoryDirectory, InMemoryMemberSource};
use member_sync::application::{
    ReconcileError, ReconciliationEngine, ReconciliationScheduler,
};
use member_sync::domain::foundation::{ExternalId, MemberId};
use member_sync::domain::member::{Member, MemberStatus, PersonName};
use member_sync::domain::reconciliation::{LocalMemberSnapshot, RemoteMemberSet};
use member_sync::ports::MemberSnapshotSource;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn remote(members: &[(i64, &str, &str)]) -> RemoteMemberSet {
    let mut set = RemoteMemberSet::new();
    for (id, first, last) in members {
        set.insert(MemberId::new(*id), PersonName::new(*first, *last));
    }
    set
}

fn ext(id: &str) -> ExternalId {
    ExternalId::new(id).unwrap()
}

fn engine(
    source: Arc<InMemoryMemberSource>,
    directory: Arc<InMemoryDirectory>,
) -> ReconciliationEngine {
    ReconciliationEngine::new(source, directory.clone(), directory)
}

async fn active_ids(directory: &InMemoryDirectory) -> Vec<i64> {
    directory
        .list()
        .await
        .unwrap()
        .iter()
        .filter(|(_, m)| m.is_active())
        .map(|(_, m)| m.id.value())
        .collect()
}

// =============================================================================
// Convergence
// =============================================================================

#[tokio::test]
async fn empty_directory_is_populated() {
    let source = Arc::new(InMemoryMemberSource::new(remote(&[
        (1, "Alice", "Smith"),
        (2, "Bob", "Jones"),
    ])));
    let directory = Arc::new(InMemoryDirectory::new());

    let summary = engine(source, directory.clone()).run_once().await.unwrap();

    assert_eq!(summary.added, 2);
    let mut ids = active_ids(&directory).await;
    ids.sort();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn second_pass_is_a_noop() {
    let source = Arc::new(InMemoryMemberSource::new(remote(&[
        (1, "Alice", "Smith"),
        (2, "Bob", "Jones"),
    ])));
    let directory = Arc::new(InMemoryDirectory::new());
    let engine = engine(source, directory.clone());

    engine.run_once().await.unwrap();
    let second = engine.run_once().await.unwrap();

    assert!(second.is_noop());
    assert_eq!(directory.len().await, 2);
}

#[tokio::test]
async fn membership_changes_flow_through() {
    let source = Arc::new(InMemoryMemberSource::new(remote(&[
        (1, "Alice", "Smith"),
        (2, "Bob", "Jones"),
    ])));
    let directory = Arc::new(InMemoryDirectory::new());
    let engine = engine(source.clone(), directory.clone());
    engine.run_once().await.unwrap();

    // Bob leaves, Alice changes her name, Carol joins
    source
        .set(remote(&[(1, "Alice", "Brown"), (3, "Carol", "White")]))
        .await;
    let summary = engine.run_once().await.unwrap();

    assert_eq!(summary.updated, 1);
    assert_eq!(summary.added, 1);
    assert_eq!(summary.disabled, 1);

    let snapshot = directory.list().await.unwrap();
    let index = snapshot.index_by_source_id();
    let (_, alice) = index[&MemberId::new(1)];
    assert_eq!(alice.name, PersonName::new("Alice", "Brown"));
    let (_, bob) = index[&MemberId::new(2)];
    assert_eq!(bob.status, MemberStatus::Deactivated);
    assert_eq!(directory.len().await, 3);
}

#[tokio::test]
async fn returning_member_reuses_directory_entry() {
    let mut snapshot = LocalMemberSnapshot::new();
    snapshot.insert(
        ext("ua-9"),
        Member::new(MemberId::new(1), PersonName::new("Alice", "Smith"))
            .with_status(MemberStatus::Deactivated),
    );
    let directory = Arc::new(InMemoryDirectory::with_snapshot(snapshot));
    let source = Arc::new(InMemoryMemberSource::new(remote(&[(1, "Alice", "Smith")])));

    let summary = engine(source, directory.clone()).run_once().await.unwrap();

    assert_eq!(summary.updated, 1);
    assert_eq!(summary.added, 0);
    assert_eq!(directory.len().await, 1);
    assert_eq!(
        directory.entry(&ext("ua-9")).await.unwrap().status,
        MemberStatus::Active
    );
}

#[tokio::test]
async fn unmanaged_pending_entries_are_left_alone() {
    let mut snapshot = LocalMemberSnapshot::new();
    snapshot.insert(
        ext("ua-5"),
        Member::new(MemberId::new(5), PersonName::new("Pending", "Invite")),
    );
    let directory = Arc::new(InMemoryDirectory::with_snapshot(snapshot));
    let source = Arc::new(InMemoryMemberSource::new(RemoteMemberSet::new()));

    let summary = engine(source, directory.clone()).run_once().await.unwrap();

    assert!(summary.is_noop());
    assert_eq!(
        directory.entry(&ext("ua-5")).await.unwrap().status,
        MemberStatus::NotActive
    );
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn failed_operation_does_not_stop_the_pass() {
    let source = Arc::new(InMemoryMemberSource::new(remote(&[
        (1, "Alice", "Smith"),
        (2, "Bob", "Jones"),
    ])));
    let directory = Arc::new(InMemoryDirectory::new());
    directory.reject(MemberId::new(1)).await;
    let engine = engine(source, directory.clone());

    let err = engine.run_once().await.unwrap_err();

    match err {
        ReconcileError::Apply { summary, last } => {
            assert_eq!(summary.added, 1);
            assert_eq!(summary.failed, 1);
            assert!(last.message.contains("1"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(active_ids(&directory).await, vec![2]);

    // The next pass retries what failed
    directory.clear_rejections().await;
    let summary = engine.run_once().await.unwrap();
    assert_eq!(summary.added, 1);
    assert_eq!(directory.len().await, 2);
}

// =============================================================================
// Dry run and scheduling
// =============================================================================

#[tokio::test]
async fn dry_run_leaves_directory_untouched() {
    let mut snapshot = LocalMemberSnapshot::new();
    snapshot.insert(
        ext("ua-1"),
        Member::active(MemberId::new(7), PersonName::new("Gone", "Member")),
    );
    let directory = Arc::new(InMemoryDirectory::with_snapshot(snapshot));
    let source = Arc::new(InMemoryMemberSource::new(remote(&[(1, "Alice", "Smith")])));
    let dry_run = Arc::new(DryRunDirectory::new(directory.clone()));
    let engine = ReconciliationEngine::new(source, dry_run.clone(), dry_run);

    let summary = engine.run_once().await.unwrap();

    assert_eq!(summary.added, 1);
    assert_eq!(summary.disabled, 1);
    assert_eq!(directory.len().await, 1);
    assert_eq!(
        directory.entry(&ext("ua-1")).await.unwrap().status,
        MemberStatus::Active
    );
}

#[tokio::test]
async fn scheduler_reconciles_until_shutdown() {
    let source = Arc::new(InMemoryMemberSource::new(remote(&[(1, "Alice", "Smith")])));
    let directory = Arc::new(InMemoryDirectory::new());
    let scheduler = Arc::new(ReconciliationScheduler::new(
        Arc::new(engine(source, directory.clone())),
        Duration::from_millis(10),
    ));
    let (tx, rx) = watch::channel(false);

    let task = {
        let scheduler = scheduler.clone();
        tokio::spawn(async move { scheduler.run(rx).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    tx.send(true).unwrap();
    tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("scheduler did not stop")
        .unwrap();

    assert_eq!(active_ids(&directory).await, vec![1]);
    assert!(scheduler.run_now().await.unwrap().is_noop());
}
