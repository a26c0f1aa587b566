//! Whole-snapshot read and replace.

use std::collections::BTreeMap;

use chrono::DateTime;
use rusqlite::{params, Connection, Transaction};

use allowance_core::errors::StorageError;
use allowance_core::models::{EntityLink, Snapshot, SyncState};

use crate::to_storage_err;

/// Replace every stored link and state with the snapshot's contents.
/// Runs inside the caller's transaction.
pub fn replace_snapshot(tx: &Transaction<'_>, snapshot: &Snapshot) -> Result<(), StorageError> {
    tx.execute("DELETE FROM entity_links", [])
        .map_err(|e| to_storage_err(e.to_string()))?;
    tx.execute("DELETE FROM sync_state", [])
        .map_err(|e| to_storage_err(e.to_string()))?;

    {
        let mut insert_link = tx
            .prepare("INSERT INTO entity_links (external_id, local_id) VALUES (?1, ?2)")
            .map_err(|e| to_storage_err(e.to_string()))?;
        for link in &snapshot.links {
            insert_link
                .execute(params![link.external_id, link.local_id])
                .map_err(|e| to_storage_err(e.to_string()))?;
        }

        let mut insert_state = tx
            .prepare(
                "INSERT INTO sync_state (local_id, last_push_ms, last_pushed_minutes)
                 VALUES (?1, ?2, ?3)",
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        for (local_id, state) in &snapshot.states {
            let last_push_ms = state.last_push_time.map(|t| t.timestamp_millis());
            insert_state
                .execute(params![local_id, last_push_ms, state.last_pushed_minutes])
                .map_err(|e| to_storage_err(e.to_string()))?;
        }
    }
    Ok(())
}

/// Read every link and state.
pub fn read_snapshot(conn: &Connection) -> Result<Snapshot, StorageError> {
    let mut stmt = conn
        .prepare("SELECT external_id, local_id FROM entity_links ORDER BY external_id")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let links = stmt
        .query_map([], |row| {
            Ok(EntityLink {
                external_id: row.get(0)?,
                local_id: row.get(1)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut stmt = conn
        .prepare("SELECT local_id, last_push_ms, last_pushed_minutes FROM sync_state")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            let local_id: String = row.get(0)?;
            let last_push_ms: Option<i64> = row.get(1)?;
            let minutes: u32 = row.get(2)?;
            Ok((local_id, last_push_ms, minutes))
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut states = BTreeMap::new();
    for (local_id, last_push_ms, minutes) in rows {
        let last_push_time = match last_push_ms {
            Some(ms) => Some(DateTime::from_timestamp_millis(ms).ok_or_else(|| {
                StorageError::Serialization {
                    message: format!("invalid last_push_ms {ms} for {local_id}"),
                }
            })?),
            None => None,
        };
        states.insert(
            local_id,
            SyncState {
                last_push_time,
                last_pushed_minutes: minutes,
            },
        );
    }

    Ok(Snapshot { links, states })
}
