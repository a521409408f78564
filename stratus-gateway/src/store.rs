//! SQLite storage for completed transfers
//!
//! Persistent backing for the completed-transfers list. Records
//! survive process restarts; the list order is newest-first and the
//! store prunes the oldest rows once the retention bound is reached.
//!
//! ## Schema
//!
//! ```sql
//! CREATE TABLE completed_transfers (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     file_name TEXT NOT NULL,
//!     direction TEXT NOT NULL,
//!     size INTEGER NOT NULL,
//!     node_handle INTEGER NOT NULL DEFAULT -1,
//!     path TEXT NOT NULL DEFAULT '',
//!     error TEXT NOT NULL DEFAULT '',
//!     timestamp INTEGER NOT NULL
//! );
//! ```
//!
//! Default path: `~/.local/share/stratus/transfers.db`

use crate::{CompletedTransfer, GatewayError, Result, TransferDirection};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// SQLite-backed store for completed transfer records
pub struct TransferStore {
    conn: Arc<Mutex<Connection>>,
}

impl TransferStore {
    /// Open (or create) the store at the default database path
    pub fn open() -> Result<Self> {
        Self::open_at(Self::default_db_path()?)
    }

    /// Open the store at an explicit path (used by tests)
    pub fn open_at<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        if let Some(parent) = db_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path.as_ref())?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        info!(
            "Completed-transfers store opened at {}",
            db_path.as_ref().display()
        );
        Ok(store)
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir().ok_or_else(|| {
            GatewayError::invalid_state("could not determine local data directory")
        })?;
        Ok(data_dir.join("stratus").join("transfers.db"))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| GatewayError::invalid_state("transfer store lock poisoned"))
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS completed_transfers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                file_name TEXT NOT NULL,
                direction TEXT NOT NULL,
                size INTEGER NOT NULL,
                node_handle INTEGER NOT NULL DEFAULT -1,
                path TEXT NOT NULL DEFAULT '',
                error TEXT NOT NULL DEFAULT '',
                timestamp INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_completed_transfers_timestamp
                ON completed_transfers(timestamp DESC);
            "#,
        )?;
        debug!("Completed-transfers schema initialized");
        Ok(())
    }

    /// Insert a record, returning it with its assigned row id
    ///
    /// The incoming `id` field is ignored; the store owns identity.
    pub fn insert(&self, transfer: &CompletedTransfer) -> Result<CompletedTransfer> {
        let conn = self.lock()?;
        conn.execute(
            r#"
            INSERT INTO completed_transfers
                (file_name, direction, size, node_handle, path, error, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                transfer.file_name,
                transfer.direction.as_str(),
                transfer.size as i64,
                transfer.node_handle,
                transfer.path,
                transfer.error,
                transfer.timestamp.timestamp(),
            ],
        )?;

        let mut stored = transfer.clone();
        stored.id = conn.last_insert_rowid();
        debug!(
            "Stored completed transfer {} ({})",
            stored.id, stored.file_name
        );
        Ok(stored)
    }

    /// All records, newest first
    pub fn load_all(&self) -> Result<Vec<CompletedTransfer>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, file_name, direction, size, node_handle, path, error, timestamp
            FROM completed_transfers
            ORDER BY timestamp DESC, id DESC
            "#,
        )?;
        let rows = stmt.query_map([], row_to_record)?;
        let mut transfers = Vec::new();
        for row in rows {
            transfers.push(row?);
        }
        Ok(transfers)
    }

    /// Remove a record by row id; returns whether a row was deleted
    pub fn remove(&self, id: i64) -> Result<bool> {
        let conn = self.lock()?;
        let deleted = conn.execute("DELETE FROM completed_transfers WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    /// Delete everything; returns the number of rows removed
    pub fn clear(&self) -> Result<usize> {
        let conn = self.lock()?;
        let deleted = conn.execute("DELETE FROM completed_transfers", [])?;
        info!("Cleared {} completed transfers", deleted);
        Ok(deleted)
    }

    /// Number of stored records
    pub fn count(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM completed_transfers", [], |row| {
                row.get(0)
            })?;
        Ok(count as usize)
    }

    /// Drop the oldest rows until at most `max` remain
    ///
    /// Returns the number of rows evicted.
    pub fn prune_to(&self, max: usize) -> Result<usize> {
        let conn = self.lock()?;
        let evicted = conn.execute(
            r#"
            DELETE FROM completed_transfers
            WHERE id NOT IN (
                SELECT id FROM completed_transfers
                ORDER BY timestamp DESC, id DESC
                LIMIT ?1
            )
            "#,
            params![max as i64],
        )?;
        if evicted > 0 {
            debug!("Pruned {} completed transfers beyond bound {}", evicted, max);
        }
        Ok(evicted)
    }
}

fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<CompletedTransfer> {
    let direction: String = row.get(2)?;
    let timestamp: i64 = row.get(7)?;
    Ok(CompletedTransfer {
        id: row.get(0)?,
        file_name: row.get(1)?,
        direction: TransferDirection::from_str(&direction)
            .unwrap_or(TransferDirection::Download),
        size: row.get::<_, i64>(3)? as u64,
        node_handle: row.get(4)?,
        path: row.get(5)?,
        error: row.get(6)?,
        timestamp: chrono::DateTime::from_timestamp(timestamp, 0).unwrap_or_default(),
    })
}
