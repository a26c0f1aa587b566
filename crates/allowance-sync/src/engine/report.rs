//! Per-tick results: one outcome per linked entity.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use allowance_core::errors::SyncError;

use crate::strategy::DecisionReason;

/// What started a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickTrigger {
    Timer,
    Manual,
}

impl fmt::Display for TickTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickTrigger::Timer => f.write_str("timer"),
            TickTrigger::Manual => f.write_str("manual"),
        }
    }
}

/// Result of evaluating one link during a tick.
#[derive(Debug)]
pub enum EntityResult {
    /// The remote accepted `minutes`; sync state was updated.
    Pushed {
        minutes: u32,
        reason: DecisionReason,
    },
    /// Quota known, nothing due.
    NotDue,
    /// No quota data for this entity right now.
    Skipped,
    /// Push or state update failed. Sync state is unchanged.
    Failed(SyncError),
}

impl EntityResult {
    pub fn is_pushed(&self) -> bool {
        matches!(self, EntityResult::Pushed { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, EntityResult::Failed(_))
    }

    pub fn error(&self) -> Option<&SyncError> {
        match self {
            EntityResult::Failed(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct EntityOutcome {
    pub external_id: String,
    pub local_id: String,
    pub result: EntityResult,
}

/// Everything one tick did, in link order.
#[derive(Debug)]
pub struct TickReport {
    pub trigger: TickTrigger,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<EntityOutcome>,
}

impl TickReport {
    pub fn pushed(&self) -> usize {
        self.count(EntityResult::is_pushed)
    }

    pub fn failed(&self) -> usize {
        self.count(EntityResult::is_failed)
    }

    pub fn skipped(&self) -> usize {
        self.count(|r| matches!(r, EntityResult::Skipped))
    }

    pub fn not_due(&self) -> usize {
        self.count(|r| matches!(r, EntityResult::NotDue))
    }

    /// Outcome for one external id, if it was linked when the tick started.
    pub fn outcome(&self, external_id: &str) -> Option<&EntityOutcome> {
        self.outcomes.iter().find(|o| o.external_id == external_id)
    }

    fn count(&self, pred: impl Fn(&EntityResult) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.result)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(id: &str, result: EntityResult) -> EntityOutcome {
        EntityOutcome {
            external_id: id.to_string(),
            local_id: format!("local-{id}"),
            result,
        }
    }

    #[test]
    fn counts_by_result_kind() {
        let now = Utc::now();
        let report = TickReport {
            trigger: TickTrigger::Manual,
            started_at: now,
            finished_at: now,
            outcomes: vec![
                outcome(
                    "a",
                    EntityResult::Pushed {
                        minutes: 20,
                        reason: DecisionReason::Increase,
                    },
                ),
                outcome("b", EntityResult::NotDue),
                outcome("c", EntityResult::Skipped),
                outcome("d", EntityResult::Failed(SyncError::Timeout { after_ms: 10 })),
                outcome("e", EntityResult::NotDue),
            ],
        };

        assert_eq!(report.pushed(), 1);
        assert_eq!(report.not_due(), 2);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert!(report.outcome("d").unwrap().result.error().is_some());
        assert!(report.outcome("zzz").is_none());
    }

    #[test]
    fn trigger_display() {
        assert_eq!(TickTrigger::Timer.to_string(), "timer");
        assert_eq!(TickTrigger::Manual.to_string(), "manual");
    }
}
