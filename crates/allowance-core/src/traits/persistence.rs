use std::sync::Mutex;

use crate::errors::StorageError;
use crate::models::Snapshot;

/// Durable home for links and sync state.
///
/// `persist` is called after every mutation with the full snapshot; `load`
/// once at startup. Losing this data would make every entity look
/// never-pushed and trigger a burst of pushes on restart.
pub trait IPersistenceSink: Send + Sync {
    fn persist(&self, snapshot: &Snapshot) -> Result<(), StorageError>;

    fn load(&self) -> Result<Option<Snapshot>, StorageError>;
}

/// Keeps the last snapshot in memory. For tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    last: Mutex<Option<Snapshot>>,
    writes: Mutex<u64>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `persist` calls.
    pub fn write_count(&self) -> u64 {
        *self.writes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl IPersistenceSink for MemoryPersistence {
    fn persist(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let mut last = self.last.lock().map_err(|_| StorageError::Poisoned)?;
        *last = Some(snapshot.clone());
        *self.writes.lock().map_err(|_| StorageError::Poisoned)? += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>, StorageError> {
        let last = self.last.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(last.clone())
    }
}
