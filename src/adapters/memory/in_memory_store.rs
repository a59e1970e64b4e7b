//! In-memory membership store.
//!
//! Used by tests and by deployments without a database. State is lost on
//! restart, so redelivered webhooks are the only way back.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::domain::foundation::{CustomerId, DomainError, ErrorCode, ExternalId, MemberId};
use crate::domain::member::{CustomerFields, Member, MemberStatus};
use crate::domain::reconciliation::LocalMemberSnapshot;
use crate::ports::{MemberSnapshotSource, MembershipStore};

/// In-memory MembershipStore keyed by customer id.
pub struct InMemoryMembershipStore {
    members: RwLock<HashMap<CustomerId, Member>>,
    next_id: AtomicI64,
}

impl InMemoryMembershipStore {
    pub fn new() -> Self {
        Self {
            members: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Creates a store pre-populated with members that carry a customer id.
    pub fn with_members(members: impl IntoIterator<Item = Member>) -> Self {
        let store = Self::new();
        let mut map = HashMap::new();
        let mut max_id = 0;
        for member in members {
            if let Some(customer_id) = member.customer_id.clone() {
                max_id = max_id.max(member.id.value());
                map.insert(customer_id, member);
            }
        }
        store.next_id.store(max_id + 1, Ordering::SeqCst);
        Self {
            members: RwLock::new(map),
            ..store
        }
    }

    // === Test Helpers ===

    /// Returns a copy of the member for `customer_id`.
    pub async fn get(&self, customer_id: &CustomerId) -> Option<Member> {
        self.members.read().await.get(customer_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.members.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.members.read().await.is_empty()
    }

    async fn modify<F>(&self, customer_id: &CustomerId, f: F) -> Result<(), DomainError>
    where
        F: FnOnce(&mut Member) -> Result<(), DomainError> + Send,
    {
        let mut members = self.members.write().await;
        let member = members.get_mut(customer_id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::MemberNotFound,
                format!("No member for customer {}", customer_id),
            )
        })?;
        f(member)
    }
}

impl Default for InMemoryMembershipStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MembershipStore for InMemoryMembershipStore {
    async fn create_or_update_customer_fields(
        &self,
        fields: &CustomerFields,
    ) -> Result<(), DomainError> {
        let mut members = self.members.write().await;
        match members.get_mut(&fields.customer_id) {
            Some(member) => fields.apply_to(member),
            None => {
                let id = MemberId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
                let member = Member::new(id, fields.name.clone())
                    .with_customer(fields.customer_id.clone(), fields.email.clone());
                members.insert(fields.customer_id.clone(), member);
            }
        }
        Ok(())
    }

    async fn activate(&self, customer_id: &CustomerId) -> Result<(), DomainError> {
        self.modify(customer_id, |member| {
            member.activate().map_err(|e| {
                DomainError::new(ErrorCode::InvalidStateTransition, e.to_string())
            })
        })
        .await
    }

    async fn set_external_id(
        &self,
        customer_id: &CustomerId,
        external_id: &ExternalId,
    ) -> Result<(), DomainError> {
        let external_id = external_id.clone();
        self.modify(customer_id, move |member| {
            member.assign_external_id(external_id).map_err(DomainError::from)
        })
        .await
    }

    async fn deactivate(&self, customer_id: &CustomerId) -> Result<(), DomainError> {
        self.modify(customer_id, |member| {
            if member.status == MemberStatus::Deactivated {
                return Ok(());
            }
            member.deactivate().map_err(|e| {
                DomainError::new(ErrorCode::InvalidStateTransition, e.to_string())
            })
        })
        .await
    }

    async fn find_by_source_id(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Option<Member>, DomainError> {
        Ok(self.get(customer_id).await)
    }
}

#[async_trait]
impl MemberSnapshotSource for InMemoryMembershipStore {
    async fn list(&self) -> Result<LocalMemberSnapshot, DomainError> {
        Ok(self.members.read().await.values().cloned().collect())
    }
}
