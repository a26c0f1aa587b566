use serde::{Deserialize, Serialize};

/// What the local quota tracker reports for one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quota {
    /// Whether the entity is currently allowed screen time at all.
    pub allowed: bool,
    /// Remaining allowance in seconds. May be negative when overdrawn.
    pub remaining_seconds: i64,
}

impl Quota {
    /// Whole minutes the remote should be told about.
    ///
    /// Zero when access is disallowed or the allowance is used up.
    pub fn remaining_minutes(&self) -> u32 {
        if self.allowed && self.remaining_seconds > 0 {
            u32::try_from(self.remaining_seconds / 60).unwrap_or(u32::MAX)
        } else {
            0
        }
    }
}
