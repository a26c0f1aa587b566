//! SyncEngine: scheduled driver for the push loop.
//!
//! A single background task wakes every `tick_interval` and runs a tick.
//! The tick body is awaited inside the loop, and a tick gate shared with
//! [`SyncEngine::sync_now`] keeps timer and manual ticks from overlapping.

mod notify;
mod report;
mod status;
mod tick;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use allowance_core::config::SyncConfig;
use allowance_core::errors::SyncResult;
use allowance_core::traits::{IClock, INotificationSink, IQuotaSource};
use allowance_remote::RemoteClient;

use crate::store::SyncStore;

pub use report::{EntityOutcome, EntityResult, TickReport, TickTrigger};
pub use status::{AuthStatus, EngineStatus, TickSummary};

#[derive(Debug, Default)]
struct StatusInner {
    auth: AuthStatus,
    last_tick: Option<TickSummary>,
}

/// State shared between the engine handle and its background task.
pub(crate) struct EngineInner {
    config: SyncConfig,
    client: Arc<RemoteClient>,
    store: Arc<SyncStore>,
    quota: Arc<dyn IQuotaSource>,
    notifier: Arc<dyn INotificationSink>,
    clock: Arc<dyn IClock>,
    tick_gate: tokio::sync::Mutex<()>,
    status: Mutex<StatusInner>,
}

impl EngineInner {
    fn status(&self) -> MutexGuard<'_, StatusInner> {
        self.status.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_auth(&self, auth: AuthStatus) {
        self.status().auth = auth;
    }

    fn set_last_tick(&self, summary: TickSummary) {
        self.status().last_tick = Some(summary);
    }
}

struct Runner {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// The main sync engine. Owns the schedule; links and state live in the
/// [`SyncStore`], remote access in the [`RemoteClient`].
pub struct SyncEngine {
    inner: Arc<EngineInner>,
    runner: Mutex<Option<Runner>>,
}

impl SyncEngine {
    pub fn new(
        config: SyncConfig,
        client: Arc<RemoteClient>,
        store: Arc<SyncStore>,
        quota: Arc<dyn IQuotaSource>,
        notifier: Arc<dyn INotificationSink>,
        clock: Arc<dyn IClock>,
    ) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                config,
                client,
                store,
                quota,
                notifier,
                clock,
                tick_gate: tokio::sync::Mutex::new(()),
                status: Mutex::new(StatusInner::default()),
            }),
            runner: Mutex::new(None),
        }
    }

    /// Start the periodic loop. The first tick runs immediately.
    ///
    /// Calling it while already running logs and does nothing.
    /// Must be called from within a Tokio runtime.
    pub fn start(&self) {
        let mut runner = self.runner();
        if runner.as_ref().is_some_and(|r| !r.handle.is_finished()) {
            tracing::info!("engine: already running");
            return;
        }

        let (shutdown, rx) = watch::channel(false);
        let handle = tokio::spawn(run_loop(Arc::clone(&self.inner), rx));
        *runner = Some(Runner { shutdown, handle });
        tracing::info!(
            tick_interval_secs = self.inner.config.tick_interval_secs,
            links = self.inner.store.len(),
            "engine: started"
        );
    }

    /// Stop scheduling new ticks. A tick already in progress finishes.
    ///
    /// Calling it while stopped does nothing.
    pub fn stop(&self) {
        match self.runner().take() {
            Some(runner) => {
                let _ = runner.shutdown.send(true);
                tracing::info!("engine: stopped");
            }
            None => tracing::debug!("engine: stop requested while not running"),
        }
    }

    /// Like [`stop`](Self::stop), but also waits for the loop task (and any
    /// in-progress tick) to finish.
    pub async fn stop_and_wait(&self) {
        let Some(runner) = self.runner().take() else {
            return;
        };
        let _ = runner.shutdown.send(true);
        if let Err(e) = runner.handle.await {
            tracing::error!(error = %e, "engine: loop task ended abnormally");
        }
        tracing::info!("engine: stopped");
    }

    pub fn is_running(&self) -> bool {
        self.runner()
            .as_ref()
            .is_some_and(|r| !r.handle.is_finished())
    }

    /// Run a tick now, waiting for any in-progress tick first.
    ///
    /// The decision function still applies: entities with nothing due are
    /// reported as `NotDue`, not pushed.
    pub async fn sync_now(&self) -> SyncResult<TickReport> {
        self.inner.run_tick(TickTrigger::Manual).await
    }

    pub fn status(&self) -> EngineStatus {
        let running = self.is_running();
        let status = self.inner.status();
        EngineStatus {
            running,
            auth: status.auth,
            last_tick: status.last_tick.clone(),
        }
    }

    pub fn store(&self) -> &Arc<SyncStore> {
        &self.inner.store
    }

    pub fn client(&self) -> &Arc<RemoteClient> {
        &self.inner.client
    }

    pub fn config(&self) -> &SyncConfig {
        &self.inner.config
    }

    fn runner(&self) -> MutexGuard<'_, Option<Runner>> {
        self.runner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for SyncEngine {
    fn drop(&mut self) {
        if let Some(runner) = self.runner().take() {
            let _ = runner.shutdown.send(true);
        }
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("running", &self.is_running())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

async fn run_loop(inner: Arc<EngineInner>, mut shutdown: watch::Receiver<bool>) {
    // `interval` panics on a zero period; config validation rejects it too.
    let period = inner.config.tick_interval().max(Duration::from_secs(1));
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                if let Err(e) = inner.run_tick(TickTrigger::Timer).await {
                    tracing::warn!(error = %e, "engine: tick aborted");
                }
            }
        }
    }
    tracing::debug!("engine: loop exited");
}
