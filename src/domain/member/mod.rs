//! Member domain module.
//!
//! - `aggregate` - Member entity, names, and reconciliation identity
//! - `customer` - Billing customer fields upserted from webhooks
//! - `status` - MemberStatus state machine

mod aggregate;
mod customer;
mod status;

pub use aggregate::{Member, MemberIdentity, PersonName};
pub use customer::CustomerFields;
pub use status::MemberStatus;
