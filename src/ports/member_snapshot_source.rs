//! Member snapshot port (read side).
//!
//! Lists the observed directory state for reconciliation. The directory
//! itself is usually the best source, since it is what reconciliation
//! mutates; a membership store that tracks external ids can serve too.

use crate::domain::foundation::DomainError;
use crate::domain::reconciliation::LocalMemberSnapshot;
use async_trait::async_trait;

/// Read port producing the local snapshot.
#[async_trait]
pub trait MemberSnapshotSource: Send + Sync {
    /// List every mirrored member, keyed by external id.
    async fn list(&self) -> Result<LocalMemberSnapshot, DomainError>;
}
