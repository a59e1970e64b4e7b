//! Access-control directory configuration (UniFi Access)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Directory API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    /// Base URL of the directory API, e.g. `https://10.0.0.2:12445`
    pub base_url: String,

    /// Bearer token for the developer API
    pub api_token: SecretString,

    /// Accept self-signed certificates. Controllers ship with one.
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Users fetched per page when listing
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl DirectoryConfig {
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: SecretString::new(api_token.into()),
            accept_invalid_certs: false,
            timeout_secs: default_timeout(),
            page_size: default_page_size(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate directory configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("directory.base_url"));
        }
        if !is_http_url(&self.base_url) {
            return Err(ValidationError::InvalidUrl("directory.base_url"));
        }
        if self.api_token.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("directory.api_token"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout("directory"));
        }
        if self.page_size == 0 || self.page_size > 500 {
            return Err(ValidationError::InvalidPageSize);
        }
        Ok(())
    }
}

pub(super) fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn default_timeout() -> u64 {
    10
}

fn default_page_size() -> u32 {
    25
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> DirectoryConfig {
        DirectoryConfig::new("https://10.0.0.2:12445", "ua-token")
    }

    #[test]
    fn test_defaults() {
        let config = valid();
        assert!(!config.accept_invalid_certs);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.page_size, 25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_base_url() {
        let config = DirectoryConfig::new("", "ua-token");
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("directory.base_url"))
        );
    }

    #[test]
    fn test_non_http_url_rejected() {
        let config = DirectoryConfig::new("10.0.0.2:12445", "ua-token");
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidUrl("directory.base_url"))
        );
    }

    #[test]
    fn test_missing_token() {
        let config = DirectoryConfig::new("https://10.0.0.2:12445", "");
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("directory.api_token"))
        );
    }

    #[test]
    fn test_page_size_bounds() {
        let config = DirectoryConfig {
            page_size: 0,
            ..valid()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPageSize));
    }
}
