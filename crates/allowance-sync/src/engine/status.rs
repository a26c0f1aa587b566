use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::report::{TickReport, TickTrigger};

/// Credential state as last observed by a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    /// No tick has run yet.
    #[default]
    Unknown,
    Authenticated,
    /// The last tick found no valid credential, or the remote rejected it.
    NeedsReauthentication,
}

/// Counts from the last completed tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSummary {
    pub trigger: TickTrigger,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub pushed: usize,
    pub not_due: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl From<&TickReport> for TickSummary {
    fn from(report: &TickReport) -> Self {
        Self {
            trigger: report.trigger,
            started_at: report.started_at,
            finished_at: report.finished_at,
            pushed: report.pushed(),
            not_due: report.not_due(),
            skipped: report.skipped(),
            failed: report.failed(),
        }
    }
}

/// Snapshot of the engine for the management surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStatus {
    pub running: bool,
    pub auth: AuthStatus,
    pub last_tick: Option<TickSummary>,
}
