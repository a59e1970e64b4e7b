//! Membership store port (write side).
//!
//! Persisted actual-state of members, keyed by billing customer id.
//!
//! # Design
//!
//! - **Idempotent**: Every operation may be repeated under redelivery
//! - **No deletes**: Members are deactivated, never removed
//! - **Stable join key**: The external id is written once and kept
//!
//! # Example
//!
//! ```ignore
//! async fn activate_known(
//!     store: &dyn MembershipStore,
//!     customer_id: &CustomerId,
//! ) -> Result<Member, DomainError> {
//!     let member = store
//!         .find_by_source_id(customer_id)
//!         .await?
//!         .ok_or_else(|| DomainError::new(ErrorCode::MemberNotFound, "unknown customer"))?;
//!
//!     store.activate(customer_id).await?;
//!     Ok(member)
//! }
//! ```

use crate::domain::foundation::{CustomerId, DomainError, ExternalId};
use crate::domain::member::{CustomerFields, Member};
use async_trait::async_trait;

/// Repository port for member lifecycle persistence.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Create the member (NotActive) if the customer is new, otherwise
    /// refresh its name and email. Status and external id are untouched.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create_or_update_customer_fields(
        &self,
        fields: &CustomerFields,
    ) -> Result<(), DomainError>;

    /// Mark the member Active.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if no member has this customer id
    /// - `DatabaseError` on persistence failure
    async fn activate(&self, customer_id: &CustomerId) -> Result<(), DomainError>;

    /// Record the directory id assigned to the member.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if no member has this customer id
    /// - `ValidationFailed` if a different external id is already recorded
    /// - `DatabaseError` on persistence failure
    async fn set_external_id(
        &self,
        customer_id: &CustomerId,
        external_id: &ExternalId,
    ) -> Result<(), DomainError>;

    /// Mark the member Deactivated. The external id is retained.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if no member has this customer id
    /// - `DatabaseError` on persistence failure
    async fn deactivate(&self, customer_id: &CustomerId) -> Result<(), DomainError>;

    /// Find a member by billing customer id.
    ///
    /// Returns `None` if the customer has never been seen.
    async fn find_by_source_id(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Option<Member>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn membership_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn MembershipStore) {}
    }
}
