//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Billing webhook endpoint (axum)
//! - `postgres` - Membership store (sqlx)
//! - `unifi` - UniFi Access directory client (reqwest)
//! - `remote` - Authoritative member list client (reqwest)
//! - `dry_run` - Directory decorator that only logs
//! - `memory` - In-memory implementations for tests and database-less runs

pub mod dry_run;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod remote;
pub mod unifi;

pub use dry_run::DryRunDirectory;
pub use memory::{InMemoryDirectory, InMemoryMemberSource, InMemoryMembershipStore};
pub use postgres::PostgresMemberStore;
pub use remote::HttpMemberSource;
pub use unifi::UnifiDirectory;
