//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, state machine trait)
//! - `member` - Member aggregate and lifecycle status
//! - `reconciliation` - Pure diff of desired vs observed directory state
//! - `billing` - Billing webhook events, signature verification, errors
//! - `directory` - Directory-wide reports

pub mod billing;
pub mod directory;
pub mod foundation;
pub mod member;
pub mod reconciliation;
