use serde::{Deserialize, Serialize};

/// Remote view of one entity's daily limit at fetch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitSnapshot {
    pub external_id: String,
    pub enabled: bool,
    pub daily_limit_minutes: u32,
    pub used_minutes: u32,
    /// `daily_limit_minutes - used_minutes`, floored at zero.
    pub remaining_minutes: u32,
}

impl LimitSnapshot {
    pub fn new(
        external_id: impl Into<String>,
        enabled: bool,
        daily_limit_minutes: u32,
        used_minutes: u32,
    ) -> Self {
        Self {
            external_id: external_id.into(),
            enabled,
            daily_limit_minutes,
            used_minutes,
            remaining_minutes: daily_limit_minutes.saturating_sub(used_minutes),
        }
    }
}
