use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Remote control service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Upper bound for a single remote call.
    pub request_timeout_secs: u64,
    /// How long a fetched roster stays fresh.
    pub roster_ttl_secs: u64,
    /// How long a fetched per-entity limit stays fresh.
    pub limit_ttl_secs: u64,
}

impl RemoteConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn roster_ttl(&self) -> Duration {
        Duration::from_secs(self.roster_ttl_secs)
    }

    pub fn limit_ttl(&self) -> Duration {
        Duration::from_secs(self.limit_ttl_secs)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
            roster_ttl_secs: defaults::DEFAULT_ROSTER_TTL_SECS,
            limit_ttl_secs: defaults::DEFAULT_LIMIT_TTL_SECS,
        }
    }
}
