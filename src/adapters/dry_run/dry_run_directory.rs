//! Dry-run directory - Logs directory changes without making them.
//!
//! Wraps the real directory so reads still hit it while writes are only
//! logged. Added members get a placeholder id of the form `dry-run-<id>`.
//!
//! # Example
//!
//! ```ignore
//! let directory = Arc::new(UnifiDirectory::new(&config.directory)?);
//! let updater = DryRunDirectory::new(directory.clone());
//! ```

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, ExternalId};
use crate::domain::member::Member;
use crate::domain::reconciliation::LocalMemberSnapshot;
use crate::ports::{AccessControlUpdater, MemberSnapshotSource};

const PLACEHOLDER_PREFIX: &str = "dry-run-";

/// AccessControlUpdater that only logs.
pub struct DryRunDirectory {
    snapshot_source: Arc<dyn MemberSnapshotSource>,
}

impl DryRunDirectory {
    /// Creates a dry-run updater that reads snapshots from `source`.
    pub fn new(source: Arc<dyn MemberSnapshotSource>) -> Self {
        Self {
            snapshot_source: source,
        }
    }

    /// Returns true for ids handed out by `add_member`.
    pub fn is_placeholder(external_id: &ExternalId) -> bool {
        external_id.as_str().starts_with(PLACEHOLDER_PREFIX)
    }
}

#[async_trait]
impl AccessControlUpdater for DryRunDirectory {
    async fn add_member(&self, member: &Member) -> Result<ExternalId, DomainError> {
        tracing::info!(member_id = %member.id, name = %member.name, "[DRY-RUN] Adding member");
        Ok(ExternalId::new(format!("{}{}", PLACEHOLDER_PREFIX, member.id))?)
    }

    async fn update_member(
        &self,
        external_id: &ExternalId,
        member: &Member,
    ) -> Result<(), DomainError> {
        tracing::info!(
            member_id = %member.id,
            external_id = %external_id,
            name = %member.name,
            "[DRY-RUN] Updating member"
        );
        Ok(())
    }

    async fn disable_member(
        &self,
        external_id: &ExternalId,
        member: &Member,
    ) -> Result<(), DomainError> {
        tracing::info!(
            member_id = %member.id,
            external_id = %external_id,
            "[DRY-RUN] Disabling member"
        );
        Ok(())
    }
}

#[async_trait]
impl MemberSnapshotSource for DryRunDirectory {
    async fn list(&self) -> Result<LocalMemberSnapshot, DomainError> {
        self.snapshot_source.list().await
    }
}
