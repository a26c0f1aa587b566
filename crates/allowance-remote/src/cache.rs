//! Response caches for the remote client.
//!
//! Uses `moka::sync::Cache` with a cache-level TTL. The roster is one entry
//! replaced wholesale on refresh; limits are keyed per external id so one
//! child's miss or invalidation never touches another's entry.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use allowance_core::models::{LimitSnapshot, RosterEntry};

/// Maximum cached limit entries. Families are small; this is a safety cap.
const MAX_LIMIT_ENTRIES: u64 = 1_000;

/// Hit/miss counters across both caches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Cache hit rate (0.0–1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

pub struct RemoteCache {
    roster: Cache<(), Arc<Vec<RosterEntry>>>,
    limits: Cache<String, LimitSnapshot>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl RemoteCache {
    pub fn new(roster_ttl: Duration, limit_ttl: Duration) -> Self {
        Self {
            roster: Cache::builder()
                .max_capacity(1)
                .time_to_live(roster_ttl)
                .build(),
            limits: Cache::builder()
                .max_capacity(MAX_LIMIT_ENTRIES)
                .time_to_live(limit_ttl)
                .build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Fresh roster, if any. A miss is never an error.
    pub fn roster(&self) -> Option<Arc<Vec<RosterEntry>>> {
        self.count(self.roster.get(&()))
    }

    /// Replace the cached roster as a whole.
    pub fn put_roster(&self, entries: Vec<RosterEntry>) -> Arc<Vec<RosterEntry>> {
        let entries = Arc::new(entries);
        self.roster.insert((), Arc::clone(&entries));
        entries
    }

    pub fn limit(&self, external_id: &str) -> Option<LimitSnapshot> {
        self.count(self.limits.get(external_id))
    }

    pub fn put_limit(&self, snapshot: LimitSnapshot) {
        self.limits.insert(snapshot.external_id.clone(), snapshot);
    }

    /// Drop one child's cached limit.
    pub fn invalidate_limit(&self, external_id: &str) {
        self.limits.invalidate(external_id);
    }

    /// Drop everything, e.g. when the signed-in account changes.
    pub fn invalidate_all(&self) {
        self.roster.invalidate_all();
        self.limits.invalidate_all();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn count<T>(&self, found: Option<T>) -> Option<T> {
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }
}

impl std::fmt::Debug for RemoteCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteCache")
            .field("limits", &self.limits.entry_count())
            .field("stats", &self.stats())
            .finish()
    }
}
