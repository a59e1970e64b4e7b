//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MEMBER_SYNC` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use member_sync::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Webhook listening on {}", config.webhook.path);
//! ```

mod database;
mod directory;
mod error;
mod remote;
mod server;
mod sync;
mod webhook;

pub use database::DatabaseConfig;
pub use directory::DirectoryConfig;
pub use error::{ConfigError, ValidationError};
pub use remote::RemoteConfig;
pub use server::ServerConfig;
pub use sync::SyncConfig;
pub use webhook::WebhookConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, log filter)
    #[serde(default)]
    pub server: ServerConfig,

    /// Billing webhook endpoint
    pub webhook: WebhookConfig,

    /// Membership store (PostgreSQL, optional)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Access-control directory (UniFi Access)
    pub directory: DirectoryConfig,

    /// Authoritative member list used by reconciliation
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Periodic reconciliation
    #[serde(default)]
    pub sync: SyncConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MEMBER_SYNC` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MEMBER_SYNC__SERVER__PORT=8081` -> `server.port = 8081`
    /// - `MEMBER_SYNC__WEBHOOK__SIGNING_SECRET=...` -> `webhook.signing_secret = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        let config = environment()?.try_deserialize()?;
        Ok(config)
    }

    /// Load only the `directory` section.
    ///
    /// Used by tools that talk to the directory and need none of the
    /// webhook or database settings.
    pub fn load_directory() -> Result<DirectoryConfig, ConfigError> {
        let directory = environment()?.get::<DirectoryConfig>("directory")?;
        directory.validate()?;
        Ok(directory)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.webhook.validate()?;
        self.database.validate()?;
        self.directory.validate()?;
        self.remote.validate(self.sync.enabled)?;
        self.sync.validate()?;
        Ok(())
    }
}

fn environment() -> Result<config::Config, ConfigError> {
    // Load .env file if present (development)
    dotenvy::dotenv().ok();

    let config = config::Config::builder()
        .add_source(
            config::Environment::default()
                .prefix("MEMBER_SYNC")
                .separator("__"),
        )
        .build()?;

    Ok(config)
}
