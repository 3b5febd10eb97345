//! Local persistence for the journal
//!
//! The journal is stored the way a browser app keeps it in local storage:
//! one JSON document under a fixed key in a small key/value table. SQLite
//! provides the table so writes are atomic.

use crate::config::StorageConfig;
use crate::error::{JournalError, Result};
use crate::journal::JournalState;
use anyhow::Context;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

pub mod types;
pub use types::StoredRecord;

/// Key the journal document is stored under
pub const STATE_KEY: &str = "tradelog.state";

/// Environment variable that overrides the database location
pub const DB_ENV_VAR: &str = "TRADELOG_DB";

/// Storage backend for the journal state
pub struct SqliteStorage {
    db_path: PathBuf,
}

impl SqliteStorage {
    /// Create a new storage instance
    ///
    /// Uses `TRADELOG_DB` when set, otherwise initializes the database file
    /// in the user's data directory.
    pub fn new() -> Result<Self> {
        if let Ok(override_path) = std::env::var(DB_ENV_VAR) {
            return Self::new_with_path(override_path);
        }

        Self::new_with_path(Self::default_path()?)
    }

    /// Create a storage instance honoring the configured path, if any
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        match &config.path {
            Some(path) => Self::new_with_path(path),
            None => Self::new(),
        }
    }

    /// Create a new storage instance that uses the specified database path.
    ///
    /// # Examples
    ///
    /// ```
    /// use tradelog::storage::SqliteStorage;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let storage = SqliteStorage::new_with_path(dir.path().join("journal.db")).unwrap();
    /// assert!(storage.load_state().unwrap().sessions.is_empty());
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(db_path: P) -> Result<Self> {
        let db_path = db_path.into();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create parent directory for database")
                    .map_err(|e| JournalError::Storage(e.to_string()))?;
            }
        }

        let storage = Self { db_path };
        storage.init()?;
        tracing::debug!(path = %storage.db_path.display(), "Opened journal storage");
        Ok(storage)
    }

    /// Default database location inside the platform data directory
    pub fn default_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "tradelog", "tradelog")
            .ok_or_else(|| JournalError::Storage("Could not determine data directory".into()))?;
        Ok(proj_dirs.data_dir().join("journal.db"))
    }

    /// Path of the database file backing this storage
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path)
            .context("Failed to open database")
            .map_err(|e| JournalError::Storage(e.to_string()).into())
    }

    /// Initialize the database schema
    fn init(&self) -> Result<()> {
        let conn = self.connect()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS entries (
                key TEXT PRIMARY KEY,
                value JSON NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to create tables")
        .map_err(|e| JournalError::Storage(e.to_string()))?;

        Ok(())
    }

    fn read_raw(&self) -> Result<Option<String>> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT value FROM entries WHERE key = ?",
            params![STATE_KEY],
            |row| row.get(0),
        )
        .optional()
        .context("Failed to query journal state")
        .map_err(|e| JournalError::Storage(e.to_string()).into())
    }

    /// Load the journal state
    ///
    /// Returns an empty journal when nothing has been saved yet. A stored
    /// document that no longer parses is logged and treated as empty so the
    /// application stays usable.
    pub fn load_state(&self) -> Result<JournalState> {
        let Some(raw) = self.read_raw()? else {
            tracing::debug!("No stored journal state, starting empty");
            return Ok(JournalState::default());
        };

        match serde_json::from_str::<JournalState>(&raw) {
            Ok(state) => {
                tracing::debug!(sessions = state.sessions.len(), "Loaded journal state");
                Ok(state)
            }
            Err(e) => {
                tracing::warn!("Stored journal state is unreadable, starting empty: {}", e);
                Ok(JournalState::default())
            }
        }
    }

    /// Save or replace the journal state
    pub fn save_state(&self, state: &JournalState) -> Result<()> {
        let mut conn = self.connect()?;

        let state_json = serde_json::to_string(state)
            .context("Failed to serialize journal state")
            .map_err(|e| JournalError::Storage(e.to_string()))?;

        let now = Utc::now().to_rfc3339();

        let tx = conn
            .transaction()
            .context("Failed to start transaction")
            .map_err(|e| JournalError::Storage(e.to_string()))?;

        tx.execute(
            "INSERT INTO entries (key, value, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            params![STATE_KEY, state_json, now],
        )
        .context("Failed to write journal state")
        .map_err(|e| JournalError::Storage(e.to_string()))?;

        tx.commit()
            .context("Failed to commit transaction")
            .map_err(|e| JournalError::Storage(e.to_string()))?;

        tracing::debug!(
            sessions = state.sessions.len(),
            bytes = state_json.len(),
            "Saved journal state"
        );
        Ok(())
    }

    /// Metadata about the stored document, if one exists
    pub fn record(&self) -> Result<Option<StoredRecord>> {
        let conn = self.connect()?;

        let row = conn
            .query_row(
                "SELECT key, created_at, updated_at, length(CAST(value AS BLOB)) FROM entries WHERE key = ?",
                params![STATE_KEY],
                |row| {
                    let key: String = row.get(0)?;
                    let created_at: String = row.get(1)?;
                    let updated_at: String = row.get(2)?;
                    let size: i64 = row.get(3)?;
                    Ok((key, created_at, updated_at, size))
                },
            )
            .optional()
            .context("Failed to query journal metadata")
            .map_err(|e| JournalError::Storage(e.to_string()))?;

        Ok(row.map(|(key, created_at, updated_at, size)| StoredRecord {
            key,
            created_at: parse_timestamp(&created_at),
            updated_at: parse_timestamp(&updated_at),
            size_bytes: usize::try_from(size).unwrap_or(0),
        }))
    }

    /// Remove the stored journal state
    pub fn clear(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute("DELETE FROM entries WHERE key = ?", params![STATE_KEY])
            .context("Failed to clear journal state")
            .map_err(|e| JournalError::Storage(e.to_string()))?;
        Ok(())
    }
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
