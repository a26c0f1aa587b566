use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last confirmed push for one linked entity.
///
/// Both fields only ever change together, after the remote accepted a push.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncState {
    /// When the last successful push happened. `None` until the first one.
    pub last_push_time: Option<DateTime<Utc>>,
    /// Minutes the remote accepted in the last successful push.
    pub last_pushed_minutes: u32,
}

impl SyncState {
    /// State recorded after a successful push.
    pub fn pushed(at: DateTime<Utc>, minutes: u32) -> Self {
        Self {
            last_push_time: Some(at),
            last_pushed_minutes: minutes,
        }
    }

    /// Whether a push has ever been confirmed for this entity.
    pub fn has_pushed(&self) -> bool {
        self.last_push_time.is_some()
    }
}
