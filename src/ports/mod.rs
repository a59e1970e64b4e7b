//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Membership Ports
//!
//! - `MembershipStore` - Persisted member lifecycle, keyed by customer id
//! - `MemberSnapshotSource` - Observed directory state for reconciliation
//!
//! ## Directory Ports
//!
//! - `AccessControlUpdater` - Add, update, and disable directory entries
//!
//! ## Source Ports
//!
//! - `RemoteMemberSource` - Authoritative list of active members

mod access_control_updater;
mod member_snapshot_source;
mod membership_store;
mod remote_member_source;

pub use access_control_updater::AccessControlUpdater;
pub use member_snapshot_source::MemberSnapshotSource;
pub use membership_store::MembershipStore;
pub use remote_member_source::RemoteMemberSource;
