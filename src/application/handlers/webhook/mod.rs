//! Webhook handlers.
//!
//! Billing events in, member lifecycle transitions out.

mod webhook_processor;

pub use webhook_processor::{WebhookOutcome, WebhookProcessor};
