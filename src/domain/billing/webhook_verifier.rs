//! Webhook signature verification.
//!
//! The billing provider signs `"<t>.<payload>"` with HMAC-SHA256 and sends
//! the result in a header of the form `t=<timestamp>,v1=<hex>[,v1=<hex>]`.
//! Timestamps are passed through as-is and not checked for freshness.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::webhook_errors::SignatureError;

/// Parsed components of the signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Timestamp exactly as sent.
    pub timestamp: String,
    /// Every `v1` MAC in the header. More than one is sent while the
    /// signing secret is being rolled.
    pub v1_signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    /// Parses a signature header.
    ///
    /// # Errors
    ///
    /// Returns `SignatureError::Malformed` if any part lacks `=`, if `t`
    /// or `v1` is missing, or if a `v1` value is not hex.
    pub fn parse(header: &str) -> Result<Self, SignatureError> {
        let mut timestamp: Option<String> = None;
        let mut v1_signatures = Vec::new();

        for part in header.split(',') {
            let (key, value) = part
                .trim()
                .split_once('=')
                .ok_or_else(|| SignatureError::Malformed("invalid header format".to_string()))?;

            match key {
                "t" => timestamp = Some(value.to_string()),
                "v1" => {
                    let signature = hex::decode(value).map_err(|_| {
                        SignatureError::Malformed("invalid v1 signature hex".to_string())
                    })?;
                    v1_signatures.push(signature);
                }
                // v0 and future schemes are ignored
                _ => {}
            }
        }

        let timestamp =
            timestamp.ok_or_else(|| SignatureError::Malformed("missing timestamp".to_string()))?;
        if v1_signatures.is_empty() {
            return Err(SignatureError::Malformed("missing v1 signature".to_string()));
        }

        Ok(SignatureHeader {
            timestamp,
            v1_signatures,
        })
    }
}

/// Verifies webhook payloads against a shared signing secret.
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: SecretString,
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier").finish_non_exhaustive()
    }
}

impl WebhookVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Verifies that `header` carries a valid MAC of `payload`.
    ///
    /// # Errors
    ///
    /// - `Malformed` - header could not be parsed
    /// - `Mismatch` - no `v1` matched
    pub fn verify(&self, payload: &[u8], header: &str) -> Result<(), SignatureError> {
        let header = SignatureHeader::parse(header)?;
        let expected = compute_signature(
            self.secret.expose_secret().as_bytes(),
            &header.timestamp,
            payload,
        );

        let matched = header
            .v1_signatures
            .iter()
            .any(|candidate| constant_time_compare(&expected, candidate));

        if matched {
            Ok(())
        } else {
            Err(SignatureError::Mismatch)
        }
    }
}

/// HMAC-SHA256 over `<timestamp>.<payload>`. The payload is signed as raw
/// bytes and need not be UTF-8.
fn compute_signature(secret: &[u8], timestamp: &str, payload: &[u8]) -> Vec<u8> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret).expect("HMAC accepts any key");
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Builds a signature header value for `payload`, as the billing provider
/// would send it.
pub fn sign_payload(secret: &str, timestamp: &str, payload: &[u8]) -> String {
    let signature = compute_signature(secret.as_bytes(), timestamp, payload);
    format!("t={},v1={}", timestamp, hex::encode(signature))
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
