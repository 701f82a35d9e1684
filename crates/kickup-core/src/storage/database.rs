//! SQLite-backed persistence.
//!
//! Provides persistent storage for:
//! - Completed drill sessions (for history and personal bests)
//! - Key-value store for primitive app state (streak counters, freeze flags)

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::drill::DrillMetrics;
use crate::error::{DatabaseError, Result};

/// A completed drill as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillRecord {
    pub id: i64,
    pub elapsed_seconds: u32,
    pub detection_count: u32,
    pub completed_at: DateTime<Utc>,
}

/// SQLite database for drill history and app state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data dir>/kickup.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("kickup.db");
        Self::open_at(&path)
    }

    /// Open (or create) a database file at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS drill_sessions (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                elapsed_seconds INTEGER NOT NULL,
                detection_count INTEGER NOT NULL,
                completed_at    TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_drill_sessions_completed_at ON drill_sessions(completed_at);",
        )
    }

    /// Record a finished drill.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record_drill(&self, metrics: DrillMetrics, completed_at: DateTime<Utc>) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO drill_sessions (elapsed_seconds, detection_count, completed_at)
             VALUES (?1, ?2, ?3)",
            params![
                metrics.elapsed_seconds,
                metrics.detection_count,
                completed_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent drills first.
    pub fn drill_history(&self, limit: usize) -> Result<Vec<DrillRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, elapsed_seconds, detection_count, completed_at
             FROM drill_sessions
             ORDER BY completed_at DESC, id DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], row_to_drill)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Drill with the most detections; the earliest one wins a tie.
    pub fn best_drill(&self) -> Result<Option<DrillRecord>> {
        let best = self
            .conn
            .query_row(
                "SELECT id, elapsed_seconds, detection_count, completed_at
                 FROM drill_sessions
                 ORDER BY detection_count DESC, id ASC
                 LIMIT 1",
                [],
                row_to_drill,
            )
            .optional()?;
        Ok(best)
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Set several kv entries atomically.
    pub fn kv_set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in entries {
            tx.execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

fn row_to_drill(row: &rusqlite::Row<'_>) -> rusqlite::Result<DrillRecord> {
    let completed_at: String = row.get(3)?;
    let completed_at = DateTime::parse_from_rfc3339(&completed_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;
    Ok(DrillRecord {
        id: row.get(0)?,
        elapsed_seconds: row.get(1)?,
        detection_count: row.get(2)?,
        completed_at,
    })
}
