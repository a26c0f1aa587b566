use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Timing knobs for the sync engine and the decision function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// How often the engine wakes up to evaluate every link.
    pub tick_interval_secs: u64,
    /// Routine resync interval when nothing changed.
    pub normal_interval_secs: u64,
    /// Resync interval used while the allowance is below the threshold.
    pub aggressive_interval_secs: u64,
    /// Remaining minutes below which the aggressive interval applies.
    pub aggressive_threshold_minutes: u32,
    /// Remaining minutes below which a low-allowance notice is sent.
    pub low_allowance_minutes: u32,
}

impl SyncConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }

    pub fn normal_interval(&self) -> Duration {
        Duration::from_secs(self.normal_interval_secs)
    }

    pub fn aggressive_interval(&self) -> Duration {
        Duration::from_secs(self.aggressive_interval_secs)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: defaults::DEFAULT_TICK_INTERVAL_SECS,
            normal_interval_secs: defaults::DEFAULT_NORMAL_INTERVAL_SECS,
            aggressive_interval_secs: defaults::DEFAULT_AGGRESSIVE_INTERVAL_SECS,
            aggressive_threshold_minutes: defaults::DEFAULT_AGGRESSIVE_THRESHOLD_MINUTES,
            low_allowance_minutes: defaults::DEFAULT_LOW_ALLOWANCE_MINUTES,
        }
    }
}
