//! Push decision function.
//!
//! Pure: the only notion of time is the `now` passed in, so every branch
//! is testable without timers.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use allowance_core::config::SyncConfig;
use allowance_core::models::SyncState;

/// Why a push is (or is not) due. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// More minutes than last pushed: honor bonus time immediately.
    Increase,
    /// Dropped to zero from a positive value: cut access immediately.
    Exhausted,
    /// Below the aggressive threshold and the short interval elapsed.
    AggressiveWindow,
    /// Routine resync interval elapsed.
    NormalWindow,
    /// Nothing due.
    NotDue,
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DecisionReason::Increase => "increase",
            DecisionReason::Exhausted => "exhausted",
            DecisionReason::AggressiveWindow => "aggressive_window",
            DecisionReason::NormalWindow => "normal_window",
            DecisionReason::NotDue => "not_due",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub push: bool,
    pub reason: DecisionReason,
}

impl Decision {
    fn push(reason: DecisionReason) -> Self {
        Self { push: true, reason }
    }

    fn wait() -> Self {
        Self {
            push: false,
            reason: DecisionReason::NotDue,
        }
    }
}

/// Decide whether `new_minutes` should be pushed now.
///
/// With no prior state the last pushed value defaults to `new_minutes`
/// (a first observation never counts as an increase) and the last push
/// time to "never", which makes both windows due.
pub fn decide(
    state: Option<&SyncState>,
    new_minutes: u32,
    now: DateTime<Utc>,
    config: &SyncConfig,
) -> Decision {
    let last_minutes = state.map_or(new_minutes, |s| s.last_pushed_minutes);
    let elapsed = elapsed_ms(state.and_then(|s| s.last_push_time), now);

    if new_minutes > last_minutes {
        return Decision::push(DecisionReason::Increase);
    }
    if new_minutes == 0 && last_minutes > 0 {
        return Decision::push(DecisionReason::Exhausted);
    }
    if new_minutes < config.aggressive_threshold_minutes
        && is_due(elapsed, config.aggressive_interval())
    {
        return Decision::push(DecisionReason::AggressiveWindow);
    }
    if is_due(elapsed, config.normal_interval()) {
        return Decision::push(DecisionReason::NormalWindow);
    }
    Decision::wait()
}

/// Milliseconds since the last push, `None` if never pushed. A push time
/// in the future (clock stepped back) counts as zero elapsed.
fn elapsed_ms(last_push: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<u128> {
    last_push.map(|t| (now - t).num_milliseconds().max(0) as u128)
}

fn is_due(elapsed: Option<u128>, interval: Duration) -> bool {
    elapsed.map_or(true, |ms| ms >= interval.as_millis())
}
