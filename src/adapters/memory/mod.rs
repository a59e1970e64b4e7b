//! In-memory adapters.
//!
//! - `InMemoryMembershipStore` - MembershipStore without a database
//! - `InMemoryDirectory` - Access-control directory stand-in
//! - `InMemoryMemberSource` - Fixed authoritative member list

mod in_memory_directory;
mod in_memory_store;

pub use in_memory_directory::{InMemoryDirectory, InMemoryMemberSource};
pub use in_memory_store::InMemoryMembershipStore;
