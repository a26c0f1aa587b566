//! SqlitePersistence: one connection behind a mutex, whole-snapshot writes
//! in a single transaction.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use allowance_core::errors::StorageError;
use allowance_core::models::Snapshot;
use allowance_core::traits::IPersistenceSink;

use crate::migrations;
use crate::pragmas::apply_pragmas;
use crate::queries::snapshot_ops;
use crate::to_storage_err;

pub struct SqlitePersistence {
    conn: Mutex<Connection>,
}

impl SqlitePersistence {
    /// Open (or create) the database file and run migrations.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        Self::initialize(conn)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> Result<Self, StorageError> {
        apply_pragmas(&conn)?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Current schema version.
    pub fn schema_version(&self) -> Result<u32, StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::Poisoned)?;
        migrations::current_version(&conn)
    }
}

impl IPersistenceSink for SqlitePersistence {
    fn persist(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let mut conn = self.conn.lock().map_err(|_| StorageError::Poisoned)?;
        let tx = conn
            .transaction()
            .map_err(|e| to_storage_err(e.to_string()))?;
        snapshot_ops::replace_snapshot(&tx, snapshot)?;
        tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
        tracing::trace!(
            links = snapshot.links.len(),
            states = snapshot.states.len(),
            "storage: snapshot persisted"
        );
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>, StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::Poisoned)?;
        let snapshot = snapshot_ops::read_snapshot(&conn)?;
        if snapshot.is_empty() {
            Ok(None)
        } else {
            Ok(Some(snapshot))
        }
    }
}

impl std::fmt::Debug for SqlitePersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlitePersistence").finish_non_exhaustive()
    }
}
