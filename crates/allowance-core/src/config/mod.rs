//! Layered configuration loaded from TOML. Every section falls back to
//! the values in [`defaults`].

pub mod defaults;
mod observability_config;
mod remote_config;
mod storage_config;
mod sync_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use observability_config::ObservabilityConfig;
pub use remote_config::RemoteConfig;
pub use storage_config::StorageConfig;
pub use sync_config::SyncConfig;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowanceConfig {
    pub sync: SyncConfig,
    pub remote: RemoteConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl AllowanceConfig {
    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file from disk.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            message: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml(&raw)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sync.tick_interval_secs == 0 {
            return Err(invalid("sync.tick_interval_secs", "must be greater than zero"));
        }
        if self.sync.aggressive_interval_secs == 0 {
            return Err(invalid("sync.aggressive_interval_secs", "must be greater than zero"));
        }
        if self.sync.normal_interval_secs == 0 {
            return Err(invalid("sync.normal_interval_secs", "must be greater than zero"));
        }
        if self.sync.aggressive_interval_secs > self.sync.normal_interval_secs {
            tracing::warn!(
                aggressive = self.sync.aggressive_interval_secs,
                normal = self.sync.normal_interval_secs,
                "aggressive interval is longer than the normal interval"
            );
        }
        if self.remote.request_timeout_secs == 0 {
            return Err(invalid("remote.request_timeout_secs", "must be greater than zero"));
        }
        if self.remote.base_url.trim().is_empty() {
            return Err(invalid("remote.base_url", "must not be empty"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
