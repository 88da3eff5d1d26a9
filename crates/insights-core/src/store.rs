// SQLite persistence for client preferences (theme and last location).

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::location::Location;
use crate::theme::THEME_KEY;

/// Key the last navigated location is persisted under.
pub const LOCATION_KEY: &str = "location";

/// Key-value preference store.
pub struct PreferenceStore {
    conn: Mutex<Connection>,
}

impl PreferenceStore {
    /// Open (or create) the store at `path`. Pass `":memory:"` for an
    /// ephemeral store.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open preference store at {path}"))?;

        conn.execute_batch("PRAGMA busy_timeout = 5000;")
            .context("failed to set preference store pragmas")?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS preferences (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );",
        )
        .context("failed to create preference schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Default on-disk location under the platform data directory.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "fantasy-insights")
            .map(|dirs| dirs.data_dir().join("preferences.db"))
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("preference store mutex poisoned")
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn()
            .execute(
                "INSERT INTO preferences (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![key, value],
            )
            .with_context(|| format!("failed to save preference {key}"))?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn()
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("failed to load preference {key}"))
    }

    pub fn theme(&self) -> Result<Option<String>> {
        self.get(THEME_KEY)
    }

    pub fn save_theme(&self, theme_id: &str) -> Result<()> {
        self.set(THEME_KEY, theme_id)
    }

    pub fn location(&self) -> Result<Location> {
        Ok(self
            .get(LOCATION_KEY)?
            .map(|q| Location::parse(&q))
            .unwrap_or_default())
    }

    pub fn save_location(&self, location: &Location) -> Result<()> {
        self.set(LOCATION_KEY, &location.to_query_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
