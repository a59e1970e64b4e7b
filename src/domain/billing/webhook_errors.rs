//! Webhook error types.
//!
//! Every failure is request-level: nothing is retried internally and
//! nothing is rolled back. Redelivery by the billing provider, together
//! with the processor's idempotent guards, is the recovery path.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::{CustomerId, DomainError};

/// Signature header failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// Header could not be parsed: a part without `=`, a missing `t`, a
    /// missing `v1`, or a `v1` that is not hex.
    #[error("malformed signature header: {0}")]
    Malformed(String),

    /// Header parsed but no `v1` matched the expected MAC.
    #[error("signature mismatch")]
    Mismatch,
}

/// Errors that occur while handling one webhook request.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Request body could not be read, including bodies over the cap.
    #[error("transport error: {0}")]
    Transport(String),

    #[error(transparent)]
    Signature(#[from] SignatureError),

    /// Envelope or typed payload could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Event references a customer with no member record.
    #[error("member not found for customer {0}")]
    NotFound(CustomerId),

    /// Member store or access-control directory failed.
    #[error("downstream error: {0}")]
    Downstream(#[from] DomainError),
}

impl WebhookError {
    /// Maps the error to the response status.
    ///
    /// - 500: body could not be read
    /// - 400: everything else
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WebhookError::Signature(_)
            | WebhookError::Decode(_)
            | WebhookError::NotFound(_)
            | WebhookError::Downstream(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Short machine-readable label for logs and error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            WebhookError::Transport(_) => "TRANSPORT_ERROR",
            WebhookError::Signature(_) => "SIGNATURE_ERROR",
            WebhookError::Decode(_) => "DECODE_ERROR",
            WebhookError::NotFound(_) => "NOT_FOUND",
            WebhookError::Downstream(_) => "DOWNSTREAM_ERROR",
        }
    }
}

impl From<serde_json::Error> for WebhookError {
    fn from(err: serde_json::Error) -> Self {
        WebhookError::Decode(err.to_string())
    }
}
