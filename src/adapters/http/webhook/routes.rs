//! Axum router configuration for the webhook endpoint.

use axum::{routing::post, Router};

use super::handlers::{handle_billing_webhook, WebhookAppState};

/// Create the webhook router.
///
/// # Routes
/// - `POST {path}` - Handle billing webhooks (signature verified, no auth)
pub fn webhook_routes(path: &str) -> Router<WebhookAppState> {
    Router::new().route(path, post(handle_billing_webhook))
}

/// Create the webhook router with its state applied.
///
/// # Example
///
/// ```ignore
/// let app = webhook_router("/stripe_events", state)
///     .layer(TraceLayer::new_for_http());
/// ```
pub fn webhook_router(path: &str, state: WebhookAppState) -> Router {
    webhook_routes(path).with_state(state)
}
