//! AllowanceRuntime: wires config, logging, storage, the remote client and
//! the engine into one handle for the management surface.

use std::path::Path;
use std::sync::Arc;

use allowance_core::config::AllowanceConfig;
use allowance_core::errors::SyncResult;
use allowance_core::models::{EntityLink, LimitSnapshot, RosterEntry};
use allowance_core::traits::{
    IClock, INotificationSink, IPersistenceSink, IQuotaSource, SharedCredential, SystemClock,
};
use allowance_observability::init_tracing;
use allowance_remote::{HttpTransport, ITransport, RemoteClient};
use allowance_storage::SqlitePersistence;

use crate::engine::SyncEngine;
use crate::store::SyncStore;

/// Options for building the runtime.
#[derive(Default)]
pub struct RuntimeOptions {
    pub config: AllowanceConfig,
    /// Use an in-memory database instead of `storage.db_path`.
    pub in_memory: bool,
    /// Replaces the HTTP transport.
    pub transport: Option<Arc<dyn ITransport>>,
    /// Replaces the system clock.
    pub clock: Option<Arc<dyn IClock>>,
}

pub struct AllowanceRuntime {
    engine: SyncEngine,
    credentials: Arc<SharedCredential>,
    config: AllowanceConfig,
}

impl AllowanceRuntime {
    /// Validate config, install logging, restore links and state, and build
    /// a stopped engine. Call [`SyncEngine::start`] via [`engine`](Self::engine)
    /// to begin the schedule.
    pub fn new(
        opts: RuntimeOptions,
        quota: Arc<dyn IQuotaSource>,
        notifier: Arc<dyn INotificationSink>,
    ) -> SyncResult<Self> {
        let config = opts.config;
        config.validate()?;
        init_tracing(&config.observability);

        let sink: Arc<dyn IPersistenceSink> = if opts.in_memory {
            Arc::new(SqlitePersistence::open_in_memory()?)
        } else {
            Arc::new(SqlitePersistence::open(Path::new(&config.storage.db_path))?)
        };
        let store = Arc::new(SyncStore::restore(sink)?);

        let transport: Arc<dyn ITransport> = match opts.transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::new(&config.remote)?),
        };
        let clock: Arc<dyn IClock> = match opts.clock {
            Some(c) => c,
            None => Arc::new(SystemClock),
        };
        let credentials = Arc::new(SharedCredential::new());
        let client = Arc::new(RemoteClient::new(
            &config.remote,
            transport,
            credentials.clone(),
            clock.clone(),
        ));

        let engine = SyncEngine::new(config.sync.clone(), client, store, quota, notifier, clock);
        tracing::info!(
            links = engine.store().len(),
            base_url = %config.remote.base_url,
            "runtime: initialized"
        );
        Ok(Self {
            engine,
            credentials,
            config,
        })
    }

    pub fn engine(&self) -> &SyncEngine {
        &self.engine
    }

    /// Slot the out-of-band login flow installs bearer credentials into.
    pub fn credentials(&self) -> &Arc<SharedCredential> {
        &self.credentials
    }

    pub fn config(&self) -> &AllowanceConfig {
        &self.config
    }

    pub fn link(&self, external_id: &str, local_id: &str) -> SyncResult<EntityLink> {
        self.engine.store().link(external_id, local_id)
    }

    pub fn unlink(&self, external_id: &str) -> SyncResult<EntityLink> {
        self.engine.store().unlink(external_id)
    }

    /// Managed children the remote knows about, for picking link targets.
    pub async fn roster(&self, force_refresh: bool) -> SyncResult<Vec<RosterEntry>> {
        self.engine.client().fetch_roster(force_refresh).await
    }

    /// What the remote currently enforces for one child.
    pub async fn remote_limit(&self, external_id: &str) -> SyncResult<LimitSnapshot> {
        self.engine.client().fetch_limit(external_id, false).await
    }

    /// Stop the schedule and wait for any in-progress tick.
    pub async fn shutdown(&self) {
        self.engine.stop_and_wait().await;
        tracing::info!("runtime: shut down");
    }
}
