//! AllowanceRuntime wiring: config validation, storage, management calls.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use allowance_core::config::AllowanceConfig;
use allowance_core::errors::{SyncError, SyncResult};
use allowance_core::models::{Credential, Quota, SyncState};
use allowance_core::traits::{IClock, InMemoryQuotaSource, TracingNotifier};
use allowance_remote::transport::protocol::{LIMIT_PATH, PUSH_LIMIT_PATH, ROSTER_PATH};
use allowance_remote::ITransport;
use allowance_sync::{AllowanceRuntime, RuntimeOptions};

struct FixedClock(DateTime<Utc>);

impl IClock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 15, 0, 0).unwrap()
}

/// Remembers the last pushed limit and reports it back on `/limit`.
#[derive(Default)]
struct EchoService {
    limit: Mutex<u32>,
}

#[async_trait]
impl ITransport for EchoService {
    async fn post(&self, path: &str, _bearer: &str, body: Value) -> SyncResult<Value> {
        match path {
            ROSTER_PATH => Ok(json!({"children": [
                {"id": "kid-a", "name": "Ada", "isManagedChild": true},
                {"id": "parent", "name": "Pat", "isManagedChild": false},
            ]})),
            LIMIT_PATH => Ok(json!({
                "enabled": true,
                "dailyLimitMinutes": *self.limit.lock().unwrap(),
                "usedMinutes": 0
            })),
            PUSH_LIMIT_PATH => {
                *self.limit.lock().unwrap() = body["dailyLimitMinutes"].as_u64().unwrap() as u32;
                Ok(json!({"accepted": true}))
            }
            other => panic!("unexpected path {other}"),
        }
    }
}

fn runtime(quotas: Arc<InMemoryQuotaSource>) -> AllowanceRuntime {
    let opts = RuntimeOptions {
        in_memory: true,
        transport: Some(Arc::new(EchoService::default())),
        clock: Some(Arc::new(FixedClock(t0()))),
        ..RuntimeOptions::default()
    };
    AllowanceRuntime::new(opts, quotas, Arc::new(TracingNotifier)).unwrap()
}

#[tokio::test]
async fn link_sync_and_read_back() {
    let quotas = Arc::new(InMemoryQuotaSource::new());
    let rt = runtime(quotas.clone());
    rt.credentials()
        .set(Credential::new("token", t0() + chrono::Duration::hours(1)));

    let roster = rt.roster(false).await.unwrap();
    assert_eq!(roster.len(), 1);
    rt.link(&roster[0].external_id, "alice").unwrap();
    quotas.set(
        "alice",
        Quota {
            allowed: true,
            remaining_seconds: 40 * 60,
        },
    );

    let report = rt.engine().sync_now().await.unwrap();
    assert_eq!(report.pushed(), 1);
    assert_eq!(rt.remote_limit("kid-a").await.unwrap().daily_limit_minutes, 40);
    assert_eq!(
        rt.engine().store().state("alice"),
        Some(SyncState::pushed(t0(), 40))
    );

    rt.unlink("kid-a").unwrap();
    assert!(rt.engine().store().is_empty());
    rt.shutdown().await;
}

#[tokio::test]
async fn calls_fail_until_credential_installed() {
    let rt = runtime(Arc::new(InMemoryQuotaSource::new()));
    assert!(matches!(
        rt.roster(false).await.unwrap_err(),
        SyncError::NotAuthenticated
    ));
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = AllowanceConfig::default();
    config.sync.tick_interval_secs = 0;
    let opts = RuntimeOptions {
        config,
        in_memory: true,
        ..RuntimeOptions::default()
    };
    let err = AllowanceRuntime::new(
        opts,
        Arc::new(InMemoryQuotaSource::new()),
        Arc::new(TracingNotifier),
    )
    .err()
    .unwrap();
    assert!(matches!(err, SyncError::Config(_)));
}

#[test]
fn defaults_build_http_transport_and_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AllowanceConfig::default();
    config.storage.db_path = dir.path().join("allowance.db").display().to_string();

    let rt = AllowanceRuntime::new(
        RuntimeOptions {
            config,
            ..RuntimeOptions::default()
        },
        Arc::new(InMemoryQuotaSource::new()),
        Arc::new(TracingNotifier),
    )
    .unwrap();
    assert!(rt.engine().store().is_empty());
    assert!(!rt.engine().is_running());
    assert!(dir.path().join("allowance.db").exists());
}
