//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresMemberStore` - Member records keyed by billing customer id

mod member_store;

pub use member_store::PostgresMemberStore;
