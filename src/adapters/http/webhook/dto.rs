//! Response bodies for the webhook endpoint.

use serde::{Deserialize, Serialize};

use crate::application::WebhookOutcome;

/// Body returned when an event was processed.
#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookAck {
    pub received: bool,
    pub outcome: String,
}

impl From<&WebhookOutcome> for WebhookAck {
    fn from(outcome: &WebhookOutcome) -> Self {
        let label = match outcome {
            WebhookOutcome::CustomerSynced { .. } => "customer_synced",
            WebhookOutcome::MemberActivated { .. } => "member_activated",
            WebhookOutcome::MemberReactivated { .. } => "member_reactivated",
            WebhookOutcome::AlreadyActive { .. } => "already_active",
            WebhookOutcome::MemberDeactivated { .. } => "member_deactivated",
            WebhookOutcome::AlreadyDeactivated { .. } => "already_deactivated",
            WebhookOutcome::Ignored { .. } => "ignored",
        };
        Self {
            received: true,
            outcome: label.to_string(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}
