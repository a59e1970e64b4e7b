//! Desired-state and observed-state member snapshots.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::foundation::{ExternalId, MemberId};
use crate::domain::member::{Member, MemberIdentity, MemberStatus, PersonName};

/// Members reported by the authoritative membership source.
///
/// Every element is Active. Entries are keyed by source id; inserting the
/// same id twice keeps the later entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteMemberSet {
    members: BTreeMap<MemberId, Member>,
}

impl RemoteMemberSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member by id and name.
    pub fn insert(&mut self, id: MemberId, name: PersonName) {
        self.members.insert(id, Member::active(id, name));
    }

    /// Adds a member, forcing it Active and dropping any directory id.
    pub fn insert_member(&mut self, member: Member) {
        let member = Member::active(member.id, member.name);
        self.members.insert(member.id, member);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.members.contains_key(&id)
    }

    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.members.get(&id)
    }

    /// Iterates members in source id order.
    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    pub fn identities(&self) -> BTreeSet<MemberIdentity> {
        self.members.values().map(Member::identity).collect()
    }
}

impl FromIterator<Member> for RemoteMemberSet {
    fn from_iter<I: IntoIterator<Item = Member>>(iter: I) -> Self {
        let mut set = Self::new();
        for member in iter {
            set.insert_member(member);
        }
        set
    }
}

/// Observed directory state: external id to member, enriched with each
/// member's source id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalMemberSnapshot {
    entries: BTreeMap<ExternalId, Member>,
}

impl LocalMemberSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a directory entry. The member's external id is set to the
    /// key so the two can never disagree.
    pub fn insert(&mut self, external_id: ExternalId, mut member: Member) {
        member.external_id = Some(external_id.clone());
        self.entries.insert(external_id, member);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, external_id: &ExternalId) -> Option<&Member> {
        self.entries.get(external_id)
    }

    /// Iterates entries in external id order.
    pub fn iter(&self) -> impl Iterator<Item = (&ExternalId, &Member)> {
        self.entries.iter()
    }

    pub fn identities(&self) -> BTreeSet<MemberIdentity> {
        self.entries.values().map(Member::identity).collect()
    }

    /// Identities of the entries that currently grant access.
    pub fn active_identities(&self) -> BTreeSet<MemberIdentity> {
        self.entries
            .values()
            .filter(|m| m.status == MemberStatus::Active)
            .map(Member::identity)
            .collect()
    }

    /// Index from source id to directory entry. When several entries
    /// share a source id the first in external id order wins.
    pub fn index_by_source_id(&self) -> BTreeMap<MemberId, (&ExternalId, &Member)> {
        let mut index = BTreeMap::new();
        for (external_id, member) in &self.entries {
            index.entry(member.id).or_insert((external_id, member));
        }
        index
    }
}

impl FromIterator<Member> for LocalMemberSnapshot {
    /// Collects members that carry an external id; others are not in the
    /// directory and are skipped.
    fn from_iter<I: IntoIterator<Item = Member>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for member in iter {
            if let Some(external_id) = member.external_id.clone() {
                snapshot.insert(external_id, member);
            }
        }
        snapshot
    }
}
