//! Periodic reconciliation settings

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Reconciliation loop configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// Run the periodic reconciliation loop
    #[serde(default)]
    pub enabled: bool,

    /// Seconds between passes
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Log directory changes instead of making them
    #[serde(default)]
    pub dry_run: bool,
}

impl SyncConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Validate sync configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.enabled && self.interval_secs < 60 {
            return Err(ValidationError::InvalidSyncInterval);
        }
        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: default_interval(),
            dry_run: false,
        }
    }
}

fn default_interval() -> u64 {
    3600
}
