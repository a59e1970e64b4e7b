//! Authoritative member source configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use super::directory::is_http_url;
use super::error::ValidationError;

/// Remote member list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    /// URL returning the JSON member list
    #[serde(default)]
    pub url: Option<String>,

    /// Optional bearer token
    #[serde(default)]
    pub token: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl RemoteConfig {
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate remote source configuration
    ///
    /// The URL is only required when reconciliation is enabled, which the
    /// caller decides.
    pub fn validate(&self, required: bool) -> Result<(), ValidationError> {
        match self.url() {
            None if required => return Err(ValidationError::MissingRequired("remote.url")),
            Some(url) if !is_http_url(url) => {
                return Err(ValidationError::InvalidUrl("remote.url"))
            }
            _ => {}
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout("remote"));
        }
        Ok(())
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
