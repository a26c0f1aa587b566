//! One pass over every link: quota, decision, push, record, notify.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::Instrument;

use allowance_core::errors::{SyncError, SyncResult};
use allowance_core::models::EntityLink;
use allowance_observability::{entity_span, tick_span};

use super::notify::notifications_for;
use super::report::{EntityOutcome, EntityResult, TickReport, TickTrigger};
use super::status::{AuthStatus, TickSummary};
use super::EngineInner;
use crate::strategy::decide;

impl EngineInner {
    /// Run one tick. Ticks are serialized: a caller arriving while
    /// another tick is in progress waits for it to finish first.
    ///
    /// Fails only when there is no valid credential, in which case
    /// nothing was called and nothing was mutated. Per-entity failures
    /// are reported in the outcomes.
    pub(super) async fn run_tick(&self, trigger: TickTrigger) -> SyncResult<TickReport> {
        let _gate = self.tick_gate.lock().await;

        let links = self.store.links();
        let span = tick_span!(trigger, links.len());
        async move {
            if !self.client.is_authenticated() {
                self.set_auth(AuthStatus::NeedsReauthentication);
                tracing::warn!("engine: no valid credential, tick aborted");
                return Err(SyncError::NotAuthenticated);
            }

            let started_at = self.clock.now();
            let outcomes = join_all(links.into_iter().map(|link| self.evaluate(link, started_at))).await;

            let rejected = outcomes
                .iter()
                .any(|o| o.result.error().is_some_and(SyncError::needs_reauthentication));
            self.set_auth(if rejected {
                AuthStatus::NeedsReauthentication
            } else {
                AuthStatus::Authenticated
            });

            let report = TickReport {
                trigger,
                started_at,
                finished_at: self.clock.now(),
                outcomes,
            };
            tracing::info!(
                pushed = report.pushed(),
                not_due = report.not_due(),
                skipped = report.skipped(),
                failed = report.failed(),
                "engine: tick complete"
            );
            self.set_last_tick(TickSummary::from(&report));
            Ok(report)
        }
        .instrument(span)
        .await
    }

    async fn evaluate(&self, link: EntityLink, now: DateTime<Utc>) -> EntityOutcome {
        let span = entity_span!(link.external_id, link.local_id);
        let result = self.evaluate_link(&link, now).instrument(span).await;
        EntityOutcome {
            external_id: link.external_id,
            local_id: link.local_id,
            result,
        }
    }

    async fn evaluate_link(&self, link: &EntityLink, now: DateTime<Utc>) -> EntityResult {
        let Some(quota) = self.quota.get_quota(&link.local_id) else {
            tracing::debug!("engine: no quota data, skipped");
            return EntityResult::Skipped;
        };
        let minutes = quota.remaining_minutes();
        let state = self.store.state(&link.local_id);

        let decision = decide(state.as_ref(), minutes, now, &self.config);
        if !decision.push {
            tracing::trace!(minutes, "engine: not due");
            return EntityResult::NotDue;
        }

        let pushed = match self.client.push_limit(&link.external_id, minutes).await {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(
                    external_id = %link.external_id,
                    minutes,
                    reason = %decision.reason,
                    error = %e,
                    "engine: push failed"
                );
                return EntityResult::Failed(e);
            }
        };

        let previous = match self.store.record_push(link, now, pushed) {
            Ok(previous) => previous,
            Err(e) => {
                tracing::warn!(
                    external_id = %link.external_id,
                    error = %e,
                    "engine: push accepted but state not recorded"
                );
                return EntityResult::Failed(e);
            }
        };

        tracing::info!(
            external_id = %link.external_id,
            minutes = pushed,
            reason = %decision.reason,
            "engine: pushed"
        );
        for n in notifications_for(
            &link.external_id,
            previous.last_pushed_minutes,
            pushed,
            decision.reason,
            &self.config,
        ) {
            self.notifier.notify(n);
        }

        EntityResult::Pushed {
            minutes: pushed,
            reason: decision.reason,
        }
    }
}
