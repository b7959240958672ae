use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Arc;
use tracing::{debug, warn};

use super::{schema, BudgetStore, SessionSource, StoreError};
use crate::models::{MonthKey, MonthRecord};

/// Multi-user store: one `budget_logs` row per (owner, month) with the
/// record as a JSON payload. Saves are upserts, so the last writer wins.
pub(crate) struct RemoteStore {
    conn: Connection,
    session: Arc<dyn SessionSource>,
}

impl RemoteStore {
    pub(crate) fn open(url: &str, session: Arc<dyn SessionSource>) -> Result<Self, StoreError> {
        let conn = Connection::open(url)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::with_connection(conn, session)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory(session: Arc<dyn SessionSource>) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?, session)
    }

    fn with_connection(conn: Connection, session: Arc<dyn SessionSource>) -> Result<Self, StoreError> {
        let mut store = Self { conn, session };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&mut self) -> Result<(), StoreError> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    /// Number of months stored for the signed-in owner.
    #[cfg(test)]
    pub(crate) fn month_count(&self) -> Result<i64, StoreError> {
        let Some(owner) = self.session.owner_id() else {
            return Ok(0);
        };
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM budget_logs WHERE owner_id = ?1",
            params![owner],
            |row| row.get(0),
        )?)
    }
}

impl BudgetStore for RemoteStore {
    fn label(&self) -> &'static str {
        "remote"
    }

    fn fetch(&mut self, key: &MonthKey) -> Result<Option<MonthRecord>, StoreError> {
        // Rows are owner-scoped; an anonymous caller sees nothing.
        let Some(owner) = self.session.owner_id() else {
            debug!(month = %key, "No session, remote fetch sees no rows");
            return Ok(None);
        };

        let data: Option<String> = self
            .conn
            .query_row(
                "SELECT data FROM budget_logs WHERE owner_id = ?1 AND date_key = ?2",
                params![owner, key.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        match data {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn persist(&mut self, key: &MonthKey, record: &MonthRecord) -> Result<(), StoreError> {
        let Some(owner) = self.session.owner_id() else {
            warn!(month = %key, "Save refused: no active session");
            return Err(StoreError::Unauthenticated);
        };

        let data = serde_json::to_string(record)?;
        self.conn.execute(
            "INSERT INTO budget_logs (owner_id, date_key, data, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(owner_id, date_key) DO UPDATE SET data = ?3, updated_at = ?4",
            params![owner, key.to_string(), data, chrono::Utc::now().to_rfc3339()],
        )?;
        debug!(month = %key, owner = %owner, "Upserted remote budget row");
        Ok(())
    }
}
