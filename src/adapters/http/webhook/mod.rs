//! HTTP adapter for the billing webhook endpoint.
//!
//! - `POST {webhook.path}` (default `/stripe_events`) - Handle billing events
//!
//! Responses: 200 once the event is handled or ignored, 400 for signature,
//! decode, lookup and downstream failures, 500 when the body cannot be read.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ErrorResponse, WebhookAck};
pub use handlers::{handle_billing_webhook, WebhookAppState, MAX_BODY_BYTES};
pub use routes::{webhook_router, webhook_routes};
