use chrono::{TimeZone, Utc};

use allowance_core::models::{EntityLink, Snapshot, SyncState};
use allowance_core::traits::IPersistenceSink;
use allowance_storage::SqlitePersistence;

fn sample_snapshot() -> Snapshot {
    let mut snap = Snapshot::default();
    snap.links.push(EntityLink::new("ext-a", "local-a"));
    snap.links.push(EntityLink::new("ext-b", "local-b"));
    let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 15, 30).unwrap();
    snap.states.insert("local-a".into(), SyncState::pushed(at, 42));
    snap.states.insert("local-b".into(), SyncState::default());
    snap
}

#[test]
fn fresh_database_loads_nothing() {
    let store = SqlitePersistence::open_in_memory().unwrap();
    assert!(store.load().unwrap().is_none());
    assert_eq!(store.schema_version().unwrap(), 1);
}

#[test]
fn persisted_snapshot_loads_back() {
    let store = SqlitePersistence::open_in_memory().unwrap();
    let snap = sample_snapshot();
    store.persist(&snap).unwrap();
    assert_eq!(store.load().unwrap(), Some(snap));
}

#[test]
fn persist_replaces_previous_contents() {
    let store = SqlitePersistence::open_in_memory().unwrap();
    store.persist(&sample_snapshot()).unwrap();

    let mut smaller = Snapshot::default();
    smaller.links.push(EntityLink::new("ext-b", "local-b"));
    smaller
        .states
        .insert("local-b".into(), SyncState::default());
    store.persist(&smaller).unwrap();

    assert_eq!(store.load().unwrap(), Some(smaller));
}

#[test]
fn empty_snapshot_clears_everything() {
    let store = SqlitePersistence::open_in_memory().unwrap();
    store.persist(&sample_snapshot()).unwrap();
    store.persist(&Snapshot::default()).unwrap();
    assert!(store.load().unwrap().is_none());
}

#[test]
fn duplicate_local_id_is_rejected_and_rolled_back() {
    let store = SqlitePersistence::open_in_memory().unwrap();
    let good = sample_snapshot();
    store.persist(&good).unwrap();

    let mut bad = Snapshot::default();
    bad.links.push(EntityLink::new("ext-x", "same"));
    bad.links.push(EntityLink::new("ext-y", "same"));
    assert!(store.persist(&bad).is_err());

    // Failed transaction leaves the previous snapshot in place.
    assert_eq!(store.load().unwrap(), Some(good));
}

#[test]
fn file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("allowance.db");
    let snap = sample_snapshot();
    {
        let store = SqlitePersistence::open(&path).unwrap();
        store.persist(&snap).unwrap();
    }
    let reopened = SqlitePersistence::open(&path).unwrap();
    assert_eq!(reopened.load().unwrap(), Some(snap));
    assert_eq!(reopened.schema_version().unwrap(), 1);
}
