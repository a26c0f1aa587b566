//! Notifications raised after a successful push.

use allowance_core::config::SyncConfig;
use allowance_core::models::{Notification, Severity};

use crate::strategy::DecisionReason;

/// Notices for one confirmed push of `minutes`, given what was pushed
/// before. Never called for evaluations that did not push, so a steady
/// low allowance does not repeat its warning every tick.
pub(crate) fn notifications_for(
    external_id: &str,
    previous_minutes: u32,
    minutes: u32,
    reason: DecisionReason,
    config: &SyncConfig,
) -> Vec<Notification> {
    let mut out = vec![Notification::new(
        "Limit synced",
        format!("{external_id}: remote limit set to {minutes} min ({reason})"),
        Severity::Info,
    )];

    if minutes > 0 && minutes < config.low_allowance_minutes {
        out.push(Notification::new(
            "Screen time running low",
            format!("{external_id} has {minutes} min left"),
            Severity::Warning,
        ));
    } else if minutes == 0 && previous_minutes > 0 {
        out.push(Notification::new(
            "Screen time used up",
            format!("{external_id} has no screen time left"),
            Severity::Critical,
        ));
    }
    out
}
