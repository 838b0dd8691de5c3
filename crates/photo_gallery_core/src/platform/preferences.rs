//! SQLite-backed `Preferences` implementation.

use super::{PlatformError, PlatformResult, Preferences};
use crate::db::{open_db, open_db_in_memory, DbResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Key-value preference store persisted in one SQLite table.
pub struct SqlitePreferences {
    conn: Connection,
}

impl SqlitePreferences {
    /// Opens (and migrates) the preference database at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an already-migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Removes one key. Missing keys are not an error.
    pub fn remove(&self, key: &str) -> PlatformResult<()> {
        self.conn
            .execute("DELETE FROM preferences WHERE key = ?1;", [key])
            .map_err(storage_error)?;
        Ok(())
    }
}

impl Preferences for SqlitePreferences {
    fn get(&self, key: &str) -> PlatformResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(storage_error)
    }

    fn set(&self, key: &str, value: &str) -> PlatformResult<()> {
        self.conn
            .execute(
                "INSERT INTO preferences (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = (strftime('%s', 'now') * 1000);",
                params![key, value],
            )
            .map_err(storage_error)?;
        Ok(())
    }
}

fn storage_error(err: rusqlite::Error) -> PlatformError {
    PlatformError::Io(format!("preference store: {err}"))
}
