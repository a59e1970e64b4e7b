//! In-memory access-control directory and member source.
//!
//! Deterministic stand-ins for the UniFi directory and the remote member
//! source, for tests and local runs.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ExternalId, MemberId};
use crate::domain::member::{Member, MemberStatus};
use crate::domain::reconciliation::{LocalMemberSnapshot, RemoteMemberSet};
use crate::ports::{AccessControlUpdater, MemberSnapshotSource, RemoteMemberSource};

const ID_PREFIX: &str = "ua-";

/// In-memory directory. Assigns external ids `ua-1`, `ua-2`, ...
pub struct InMemoryDirectory {
    entries: RwLock<BTreeMap<ExternalId, Member>>,
    rejected: RwLock<HashSet<MemberId>>,
    next_id: AtomicU64,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            rejected: RwLock::new(HashSet::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Creates a directory holding the given snapshot's entries.
    ///
    /// Generated ids continue after the highest seeded `ua-N` key.
    pub fn with_snapshot(snapshot: LocalMemberSnapshot) -> Self {
        let entries: BTreeMap<ExternalId, Member> = snapshot
            .iter()
            .map(|(id, member)| (id.clone(), member.clone()))
            .collect();
        let highest = entries
            .keys()
            .filter_map(|id| id.as_str().strip_prefix(ID_PREFIX)?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            entries: RwLock::new(entries),
            rejected: RwLock::new(HashSet::new()),
            next_id: AtomicU64::new(highest + 1),
        }
    }

    // === Test Helpers ===

    /// Makes every operation on `member_id` fail until cleared.
    pub async fn reject(&self, member_id: MemberId) {
        self.rejected.write().await.insert(member_id);
    }

    pub async fn clear_rejections(&self) {
        self.rejected.write().await.clear();
    }

    pub async fn entry(&self, external_id: &ExternalId) -> Option<Member> {
        self.entries.read().await.get(external_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    async fn check(&self, member: &Member) -> Result<(), DomainError> {
        if self.rejected.read().await.contains(&member.id) {
            return Err(DomainError::directory(format!(
                "directory rejected member {}",
                member.id
            )));
        }
        Ok(())
    }

    async fn set_entry(
        &self,
        external_id: &ExternalId,
        member: &Member,
        status: MemberStatus,
    ) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        if !entries.contains_key(external_id) {
            return Err(DomainError::directory(format!(
                "no directory user {}",
                external_id
            )));
        }
        let mut entry = member.clone().with_status(status);
        entry.external_id = Some(external_id.clone());
        entries.insert(external_id.clone(), entry);
        Ok(())
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccessControlUpdater for InMemoryDirectory {
    async fn add_member(&self, member: &Member) -> Result<ExternalId, DomainError> {
        self.check(member).await?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let external_id = ExternalId::new(format!("{}{}", ID_PREFIX, n))?;
        let mut entry = member.clone().with_status(MemberStatus::Active);
        entry.external_id = Some(external_id.clone());
        self.entries.write().await.insert(external_id.clone(), entry);
        Ok(external_id)
    }

    async fn update_member(
        &self,
        external_id: &ExternalId,
        member: &Member,
    ) -> Result<(), DomainError> {
        self.check(member).await?;
        self.set_entry(external_id, member, MemberStatus::Active).await
    }

    async fn disable_member(
        &self,
        external_id: &ExternalId,
        member: &Member,
    ) -> Result<(), DomainError> {
        self.check(member).await?;
        self.set_entry(external_id, member, MemberStatus::Deactivated)
            .await
    }
}

#[async_trait]
impl MemberSnapshotSource for InMemoryDirectory {
    async fn list(&self) -> Result<LocalMemberSnapshot, DomainError> {
        let entries = self.entries.read().await;
        let mut snapshot = LocalMemberSnapshot::new();
        for (external_id, member) in entries.iter() {
            snapshot.insert(external_id.clone(), member.clone());
        }
        Ok(snapshot)
    }
}

/// In-memory authoritative member list.
pub struct InMemoryMemberSource {
    members: RwLock<RemoteMemberSet>,
}

impl InMemoryMemberSource {
    pub fn new(members: RemoteMemberSet) -> Self {
        Self {
            members: RwLock::new(members),
        }
    }

    /// Replaces the member list.
    pub async fn set(&self, members: RemoteMemberSet) {
        *self.members.write().await = members;
    }
}

#[async_trait]
impl RemoteMemberSource for InMemoryMemberSource {
    async fn list_members(&self) -> Result<RemoteMemberSet, DomainError> {
        Ok(self.members.read().await.clone())
    }
}
