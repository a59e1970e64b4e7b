//! Webhook endpoint configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Billing webhook configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Route the endpoint is mounted on
    #[serde(default = "default_path")]
    pub path: String,

    /// Endpoint signing secret shared with the billing provider
    pub signing_secret: SecretString,

    /// Header carrying the signature
    #[serde(default = "default_signature_header")]
    pub signature_header: String,
}

impl WebhookConfig {
    pub fn new(signing_secret: impl Into<String>) -> Self {
        Self {
            path: default_path(),
            signing_secret: SecretString::new(signing_secret.into()),
            signature_header: default_signature_header(),
        }
    }

    /// Validate webhook configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.signing_secret.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("webhook.signing_secret"));
        }
        if !self.path.starts_with('/') {
            return Err(ValidationError::InvalidWebhookPath);
        }
        if self.signature_header.trim().is_empty() {
            return Err(ValidationError::MissingRequired("webhook.signature_header"));
        }
        Ok(())
    }
}

fn default_path() -> String {
    "/stripe_events".to_string()
}

fn default_signature_header() -> String {
    "Stripe-Signature".to_string()
}
