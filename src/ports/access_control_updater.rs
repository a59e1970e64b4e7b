//! Access-control directory port.
//!
//! Mutates entries in the physical access-control system. Implementations
//! own their call timeouts; callers decide whether to retry.

use crate::domain::foundation::{DomainError, ExternalId};
use crate::domain::member::Member;
use async_trait::async_trait;

/// Write port for the access-control directory.
#[async_trait]
pub trait AccessControlUpdater: Send + Sync {
    /// Create a directory entry for the member.
    ///
    /// Returns the external id the directory assigned.
    ///
    /// # Errors
    ///
    /// - `DirectoryError` if the directory rejects or cannot be reached
    async fn add_member(&self, member: &Member) -> Result<ExternalId, DomainError>;

    /// Rewrite an existing entry with the member's name and re-enable it.
    ///
    /// # Errors
    ///
    /// - `DirectoryError` if the directory rejects or cannot be reached
    async fn update_member(&self, external_id: &ExternalId, member: &Member)
        -> Result<(), DomainError>;

    /// Disable an entry. The entry and its id stay in the directory.
    ///
    /// # Errors
    ///
    /// - `DirectoryError` if the directory rejects or cannot be reached
    async fn disable_member(
        &self,
        external_id: &ExternalId,
        member: &Member,
    ) -> Result<(), DomainError>;
}
