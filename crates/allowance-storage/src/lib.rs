//! # allowance-storage
//!
//! SQLite-backed [`IPersistenceSink`](allowance_core::traits::IPersistenceSink).
//! Holds entity links and per-entity sync state so a restart resumes with
//! the same decision history.

pub mod migrations;
pub mod persistence;
pub mod pragmas;
pub mod queries;

pub use persistence::SqlitePersistence;

use allowance_core::errors::StorageError;

/// Wrap a rusqlite error message.
pub(crate) fn to_storage_err(message: String) -> StorageError {
    StorageError::Sqlite { message }
}
