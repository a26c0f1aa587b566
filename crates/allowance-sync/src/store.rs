//! SyncStore: the link registry and the per-entity sync state, owned
//! together so a link and its state are created and removed as one.
//!
//! Every mutation persists the full snapshot before it becomes visible.
//! If persisting fails the in-memory change is rolled back and the error
//! returned, so memory and disk never disagree.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use allowance_core::errors::{StorageError, SyncError, SyncResult};
use allowance_core::models::{EntityLink, Snapshot, SyncState};
use allowance_core::traits::IPersistenceSink;

#[derive(Debug, Clone, Default)]
struct StoreInner {
    /// external_id → local_id
    links: BTreeMap<String, String>,
    /// local_id → state
    states: HashMap<String, SyncState>,
}

impl StoreInner {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            links: self
                .links
                .iter()
                .map(|(ext, local)| EntityLink::new(ext.clone(), local.clone()))
                .collect(),
            states: self
                .states
                .iter()
                .map(|(local, state)| (local.clone(), *state))
                .collect(),
        }
    }

    fn external_for_local(&self, local_id: &str) -> Option<&str> {
        self.links
            .iter()
            .find(|(_, local)| local.as_str() == local_id)
            .map(|(ext, _)| ext.as_str())
    }
}

pub struct SyncStore {
    inner: Mutex<StoreInner>,
    sink: Arc<dyn IPersistenceSink>,
}

impl SyncStore {
    /// Empty store writing through to `sink`.
    pub fn new(sink: Arc<dyn IPersistenceSink>) -> Self {
        Self {
            inner: Mutex::new(StoreInner::default()),
            sink,
        }
    }

    /// Rebuild from whatever `sink` last persisted.
    ///
    /// Links without state get a zeroed state; states without a link are
    /// dropped.
    pub fn restore(sink: Arc<dyn IPersistenceSink>) -> SyncResult<Self> {
        let snapshot = sink.load()?.unwrap_or_default();
        let mut inner = StoreInner::default();
        for link in snapshot.links {
            let state = snapshot
                .states
                .get(&link.local_id)
                .copied()
                .unwrap_or_default();
            inner.states.insert(link.local_id.clone(), state);
            inner.links.insert(link.external_id, link.local_id);
        }
        let orphans = snapshot.states.len().saturating_sub(inner.states.len());
        if orphans > 0 {
            tracing::warn!(orphans, "store: dropped sync state without a link");
        }
        tracing::info!(links = inner.links.len(), "store: restored");
        Ok(Self {
            inner: Mutex::new(inner),
            sink,
        })
    }

    /// Link `external_id` to `local_id` with a zeroed sync state.
    ///
    /// Re-linking an already linked external id overwrites the mapping and
    /// resets its state, so the next tick sees it as never pushed.
    pub fn link(&self, external_id: &str, local_id: &str) -> SyncResult<EntityLink> {
        let mut inner = self.lock()?;
        if let Some(owner) = inner.external_for_local(local_id) {
            if owner != external_id {
                return Err(SyncError::LocalAlreadyLinked {
                    local_id: local_id.to_string(),
                    external_id: owner.to_string(),
                });
            }
        }

        let before = inner.clone();
        if let Some(previous_local) = inner
            .links
            .insert(external_id.to_string(), local_id.to_string())
        {
            inner.states.remove(&previous_local);
            tracing::info!(
                external_id,
                previous_local = %previous_local,
                local_id,
                "store: re-linked, sync state reset"
            );
        }
        inner.states.insert(local_id.to_string(), SyncState::default());
        self.commit(&mut inner, before)?;

        tracing::info!(external_id, local_id, "store: linked");
        Ok(EntityLink::new(external_id, local_id))
    }

    /// Remove a link together with its sync state.
    pub fn unlink(&self, external_id: &str) -> SyncResult<EntityLink> {
        let mut inner = self.lock()?;
        let before = inner.clone();
        let local_id = inner
            .links
            .remove(external_id)
            .ok_or_else(|| SyncError::LinkNotFound {
                external_id: external_id.to_string(),
            })?;
        inner.states.remove(&local_id);
        self.commit(&mut inner, before)?;

        tracing::info!(external_id, local_id = %local_id, "store: unlinked");
        Ok(EntityLink::new(external_id, local_id))
    }

    /// Record a confirmed push. Both fields change together.
    ///
    /// Fails with `LinkNotFound` if the link was removed or re-pointed
    /// while the push was in flight; the state is not resurrected.
    /// Returns the state as it was before the push.
    pub fn record_push(
        &self,
        link: &EntityLink,
        at: DateTime<Utc>,
        minutes: u32,
    ) -> SyncResult<SyncState> {
        let mut inner = self.lock()?;
        if inner.links.get(&link.external_id) != Some(&link.local_id) {
            return Err(SyncError::LinkNotFound {
                external_id: link.external_id.clone(),
            });
        }
        let before = inner.clone();
        let previous = inner
            .states
            .insert(link.local_id.clone(), SyncState::pushed(at, minutes))
            .unwrap_or_default();
        self.commit(&mut inner, before)?;
        Ok(previous)
    }

    /// All links, ordered by external id.
    pub fn links(&self) -> Vec<EntityLink> {
        self.read()
            .links
            .iter()
            .map(|(ext, local)| EntityLink::new(ext.clone(), local.clone()))
            .collect()
    }

    pub fn get_link(&self, external_id: &str) -> Option<EntityLink> {
        self.read()
            .links
            .get(external_id)
            .map(|local| EntityLink::new(external_id, local.clone()))
    }

    pub fn state(&self, local_id: &str) -> Option<SyncState> {
        self.read().states.get(local_id).copied()
    }

    pub fn len(&self) -> usize {
        self.read().links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> Snapshot {
        self.read().snapshot()
    }

    /// Persist the mutated state; on failure put `before` back.
    fn commit(&self, inner: &mut StoreInner, before: StoreInner) -> SyncResult<()> {
        if let Err(e) = self.sink.persist(&inner.snapshot()) {
            tracing::error!(error = %e, "store: persist failed, rolling back");
            *inner = before;
            return Err(e.into());
        }
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreInner>, StorageError> {
        self.inner.lock().map_err(|_| StorageError::Poisoned)
    }

    /// Reads tolerate poisoning: the data is only ever replaced whole.
    fn read(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for SyncStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncStore")
            .field("links", &self.len())
            .finish_non_exhaustive()
    }
}
