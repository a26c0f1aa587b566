//! RemoteClient: auth gate, per-call timeout, request serialization and
//! response caching around an [`ITransport`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::Instrument;

use allowance_core::config::RemoteConfig;
use allowance_core::errors::{SyncError, SyncResult};
use allowance_core::models::{LimitSnapshot, RosterEntry};
use allowance_core::traits::{IClock, ICredentialProvider};
use allowance_observability::remote_span;

use crate::auth::CredentialGate;
use crate::cache::{CacheStats, RemoteCache};
use crate::transport::protocol::{
    self, LimitRequest, LimitResponse, PushLimitRequest, PushLimitResponse, RosterRequest,
    RosterResponse, LIMIT_PATH, PUSH_LIMIT_PATH, ROSTER_PATH,
};
use crate::transport::ITransport;

/// Authenticated, cached access to roster, limit and push operations.
///
/// Each method is a single attempt. Requests go out one at a time; the
/// cache is updated while the request slot is still held, so a push's
/// invalidation can never be overtaken by an older read's insert.
pub struct RemoteClient {
    transport: Arc<dyn ITransport>,
    gate: CredentialGate,
    cache: RemoteCache,
    request_timeout: Duration,
    in_flight: Mutex<()>,
}

impl RemoteClient {
    pub fn new(
        config: &RemoteConfig,
        transport: Arc<dyn ITransport>,
        credentials: Arc<dyn ICredentialProvider>,
        clock: Arc<dyn IClock>,
    ) -> Self {
        Self {
            transport,
            gate: CredentialGate::new(credentials, clock),
            cache: RemoteCache::new(config.roster_ttl(), config.limit_ttl()),
            request_timeout: config.request_timeout(),
            in_flight: Mutex::new(()),
        }
    }

    /// True iff a credential is present and not yet expired.
    pub fn is_authenticated(&self) -> bool {
        self.gate.is_authenticated()
    }

    /// Managed children on the remote roster.
    ///
    /// Served from cache while fresh unless `force_refresh`. A refresh
    /// replaces the cached roster as a whole.
    pub async fn fetch_roster(&self, force_refresh: bool) -> SyncResult<Vec<RosterEntry>> {
        self.gate.bearer()?;
        if !force_refresh {
            if let Some(roster) = self.cache.roster() {
                return Ok(managed_children(&roster));
            }
        }

        let _slot = self.in_flight.lock().await;
        if !force_refresh {
            // Another caller may have refreshed while we waited.
            if let Some(roster) = self.cache.roster() {
                return Ok(managed_children(&roster));
            }
        }
        let bearer = self.gate.bearer()?;

        let body = protocol::encode(&RosterRequest::default())?;
        let resp: RosterResponse = protocol::decode(self.call(ROSTER_PATH, &bearer, body).await?)?;
        let entries = resp.children.into_iter().map(RosterEntry::from).collect();
        let roster = self.cache.put_roster(entries);
        tracing::debug!(total = roster.len(), "remote: roster refreshed");
        Ok(managed_children(&roster))
    }

    /// Limit snapshot for one child, cached per child.
    pub async fn fetch_limit(
        &self,
        external_id: &str,
        force_refresh: bool,
    ) -> SyncResult<LimitSnapshot> {
        self.gate.bearer()?;
        if !force_refresh {
            if let Some(snapshot) = self.cache.limit(external_id) {
                return Ok(snapshot);
            }
        }

        let _slot = self.in_flight.lock().await;
        if !force_refresh {
            if let Some(snapshot) = self.cache.limit(external_id) {
                return Ok(snapshot);
            }
        }
        let bearer = self.gate.bearer()?;

        let body = protocol::encode(&LimitRequest {
            id: external_id.to_string(),
        })?;
        let resp: LimitResponse = protocol::decode(self.call(LIMIT_PATH, &bearer, body).await?)?;
        let snapshot = resp.into_snapshot(external_id);
        self.cache.put_limit(snapshot.clone());
        Ok(snapshot)
    }

    /// Set a child's daily limit on the remote.
    ///
    /// On success the child's cached limit is dropped and the accepted value
    /// returned. On any failure nothing is mutated.
    pub async fn push_limit(&self, external_id: &str, minutes: u32) -> SyncResult<u32> {
        self.gate.bearer()?;
        let _slot = self.in_flight.lock().await;
        // The credential may have expired while waiting for the slot.
        let bearer = self.gate.bearer()?;

        let body = protocol::encode(&PushLimitRequest {
            id: external_id.to_string(),
            daily_limit_minutes: minutes,
            enabled: true,
        })?;
        let resp: PushLimitResponse =
            protocol::decode(self.call(PUSH_LIMIT_PATH, &bearer, body).await?)?;
        if !resp.accepted {
            return Err(SyncError::PushRejected {
                external_id: external_id.to_string(),
            });
        }

        self.cache.invalidate_limit(external_id);
        tracing::info!(external_id, minutes, "remote: limit pushed");
        Ok(minutes)
    }

    /// Drop every cached response.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// One transport attempt bounded by the request timeout.
    async fn call(
        &self,
        path: &str,
        bearer: &str,
        body: serde_json::Value,
    ) -> SyncResult<serde_json::Value> {
        let fut = self.transport.post(path, bearer, body);
        match tokio::time::timeout(self.request_timeout, fut)
            .instrument(remote_span!(path))
            .await
        {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(path, timeout = ?self.request_timeout, "remote: call timed out");
                Err(SyncError::Timeout {
                    after_ms: self.request_timeout.as_millis() as u64,
                })
            }
        }
    }
}

fn managed_children(roster: &[RosterEntry]) -> Vec<RosterEntry> {
    roster
        .iter()
        .filter(|e| e.is_managed_child)
        .cloned()
        .collect()
}

impl std::fmt::Debug for RemoteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteClient")
            .field("gate", &self.gate)
            .field("cache", &self.cache)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
