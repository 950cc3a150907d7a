//! `SQLite` database connection and operations.
//!
//! The database is stored at `~/.lapse/lapse.db` and holds a single `kv`
//! table backing the [`KeyValueStore`] used for session history and
//! preferences.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::LapseError;

use super::kv::KeyValueStore;
use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, LapseError> {
        let conn = Connection::open(path).map_err(|e| {
            LapseError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "opened database");

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, LapseError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            LapseError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Run database migrations.
    fn migrate(&self) -> Result<(), LapseError> {
        migrations::run(&self.conn)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, LapseError> {
        migrations::get_version(&self.conn)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, LapseError> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()
            .map_err(|e| LapseError::Database(format!("Failed to read key {key}: {e}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LapseError> {
        self.conn
            .execute(
                r"INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                  ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(|e| LapseError::Database(format!("Failed to write key {key}: {e}")))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, LapseError> {
        let rows = self
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", [key])
            .map_err(|e| LapseError::Database(format!("Failed to remove key {key}: {e}")))?;
        Ok(rows > 0)
    }
}
