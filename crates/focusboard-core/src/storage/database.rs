//! SQLite-backed key-value store.
//!
//! Holds the state that must survive between sessions: the goal sequence
//! and the theme preference. One `kv` table, one row per key.

use std::path::Path;

use rusqlite::{params, Connection};

use super::{data_dir, PersistentStore};
use crate::error::StoreError;

/// SQLite database used as the persistent store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/focusboard/focusboard.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        Self::open_at(&data_dir()?.join("focusboard.db"))
    }

    /// Open (or create) a database file at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        tracing::debug!(path = %path.display(), "opened store");
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

impl PersistentStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.kv_get(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        Ok(self.kv_set(key, value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
    }

    #[test]
    fn set_replaces_previous_value() {
        let mut db = Database::open_memory().unwrap();
        db.set("darkMode", "true").unwrap();
        db.set("darkMode", "false").unwrap();
        assert_eq!(db.get("darkMode").unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("focusboard.db");
        {
            let mut db = Database::open_at(&path).unwrap();
            db.set("goals", r#"[{"text":"a","done":false}]"#).unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(
            db.get("goals").unwrap().as_deref(),
            Some(r#"[{"text":"a","done":false}]"#)
        );
    }
}
