//! Remote member source port.
//!
//! The authoritative desired-state query. Every member it returns is
//! implicitly Active.

use crate::domain::foundation::DomainError;
use crate::domain::reconciliation::RemoteMemberSet;
use async_trait::async_trait;

#[async_trait]
pub trait RemoteMemberSource: Send + Sync {
    /// List the members that should currently hold access.
    ///
    /// # Errors
    ///
    /// - `RemoteSourceError` if the source cannot be queried or decoded
    async fn list_members(&self) -> Result<RemoteMemberSet, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn remote_member_source_is_object_safe() {
        fn _accepts_dyn(_source: &dyn RemoteMemberSource) {}
    }
}
