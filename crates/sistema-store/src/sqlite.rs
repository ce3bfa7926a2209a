//! SQLite-based store implementation

use rusqlite::{Connection, OptionalExtension, params};
use sistema_api::{PersistedState, STATE_KEY};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::{StateStore, StoreError, StoreResult};

/// SQLite-based store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a store at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Database("store lock poisoned".into()))
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- One JSON document per key
            CREATE TABLE IF NOT EXISTS documents (
                key TEXT PRIMARY KEY,
                document_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )?;

        debug!("Store schema initialized");
        Ok(())
    }

    /// Raw JSON of the stored document, if any
    pub fn load_raw(&self) -> StoreResult<Option<String>> {
        let conn = self.conn()?;

        let json = conn
            .query_row(
                "SELECT document_json FROM documents WHERE key = ?",
                [STATE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        Ok(json)
    }

    /// Store raw JSON under the state key without decoding it
    pub fn save_raw(&self, json: &str) -> StoreResult<()> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO documents (key, document_json, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key)
            DO UPDATE SET document_json = excluded.document_json,
                          updated_at = excluded.updated_at
            "#,
            params![STATE_KEY, json, chrono::Utc::now().to_rfc3339()],
        )?;

        Ok(())
    }
}

impl StateStore for SqliteStore {
    fn load(&self) -> StoreResult<Option<PersistedState>> {
        match self.load_raw()? {
            Some(json) => {
                let state: PersistedState = serde_json::from_str(&json)?;
                debug!(last_reset = %state.last_reset_date, "State loaded");
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }

    fn save(&self, state: &PersistedState) -> StoreResult<()> {
        let json = serde_json::to_string(state)?;
        self.save_raw(&json)?;

        debug!(
            last_reset = %state.last_reset_date,
            history_len = state.history.len(),
            "State saved"
        );
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        match self.conn.lock() {
            Ok(conn) => conn.query_row("SELECT 1", [], |_| Ok(())).is_ok(),
            Err(_) => {
                warn!("Store lock poisoned");
                false
            }
        }
    }
}
