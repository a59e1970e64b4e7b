//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, error types, and the state machine trait
//! that form the vocabulary of the member sync domain.

mod errors;
mod ids;
mod state_machine;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CustomerId, ExternalId, MemberId};
pub use state_machine::StateMachine;
