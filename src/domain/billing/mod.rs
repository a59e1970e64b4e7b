//! Billing webhook domain.
//!
//! - `billing_event` - Event envelope and typed payloads
//! - `webhook_errors` - Request-level error taxonomy
//! - `webhook_verifier` - HMAC-SHA256 signature verification

mod billing_event;
mod webhook_errors;
mod webhook_verifier;

pub use billing_event::{
    BillingEvent, BillingEventData, BillingEventType, CustomerPayload, SubscriptionPayload,
};
pub use webhook_errors::{SignatureError, WebhookError};
pub use webhook_verifier::{sign_payload, SignatureHeader, WebhookVerifier};
