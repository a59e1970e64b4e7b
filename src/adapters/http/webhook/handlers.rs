//! HTTP handler for billing webhook deliveries.

use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

use crate::application::WebhookProcessor;
use crate::domain::billing::WebhookError;

use super::dto::{ErrorResponse, WebhookAck};

/// Largest request body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 65_536;

/// Shared state for the webhook endpoint.
#[derive(Clone)]
pub struct WebhookAppState {
    pub processor: Arc<WebhookProcessor>,
    /// Header carrying the signature, e.g. `Stripe-Signature`.
    pub signature_header: String,
}

impl WebhookAppState {
    pub fn new(processor: Arc<WebhookProcessor>, signature_header: impl Into<String>) -> Self {
        Self {
            processor,
            signature_header: signature_header.into(),
        }
    }
}

/// POST {webhook.path} - Handle billing provider events
///
/// A missing signature header is treated as an empty one, so it fails
/// verification with 400 like any other bad signature.
pub async fn handle_billing_webhook(
    State(state): State<WebhookAppState>,
    request: Request,
) -> Result<impl IntoResponse, WebhookApiError> {
    let signature = request
        .headers()
        .get(state.signature_header.as_str())
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let payload = to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| WebhookError::Transport(format!("failed to read request body: {}", e)))?;

    let outcome = state.processor.handle(&payload, &signature).await?;
    tracing::info!(outcome = ?outcome, "webhook processed");

    Ok(Json(WebhookAck::from(&outcome)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts webhook errors to HTTP responses.
#[derive(Debug)]
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, kind = self.0.kind(), "webhook request failed");
        } else {
            tracing::warn!(error = %self.0, kind = self.0.kind(), "webhook rejected");
        }

        let body = ErrorResponse::new(self.0.kind(), self.0.to_string());
        (status, Json(body)).into_response()
    }
}
