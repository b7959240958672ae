//! Durable homes for month records.
//!
//! Two interchangeable backends sit behind [`BudgetStore`]:
//! - `local` - one JSON blob holding every month, rewritten in full on save
//! - `remote` - a shared `budget_logs` table, one row per (owner, month),
//!   upserted on save
//!
//! A missing record is `Ok(None)`, never an error.

mod local;
mod remote;
mod schema;
mod session;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::config::Settings;
use crate::models::{MonthKey, MonthRecord};

pub(crate) use local::{LocalStore, LOCAL_STORAGE_NAME};
pub(crate) use remote::RemoteStore;
pub(crate) use session::{SessionSource, StaticSession};

#[derive(Debug, thiserror::Error)]
pub(crate) enum StoreError {
    #[error("Remote store error: {0}")]
    Transport(#[from] rusqlite::Error),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored budget data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Not logged in: an active session is required to save")]
    Unauthenticated,
}

pub(crate) trait BudgetStore: Send {
    /// Short backend name for logs and status lines.
    fn label(&self) -> &'static str;

    fn fetch(&mut self, key: &MonthKey) -> Result<Option<MonthRecord>, StoreError>;

    fn persist(&mut self, key: &MonthKey, record: &MonthRecord) -> Result<(), StoreError>;
}

/// Pick the backend once at startup: remote when credentials are present,
/// the local blob otherwise.
pub(crate) fn open_store(
    settings: &Settings,
    session: Arc<dyn SessionSource>,
) -> Result<Box<dyn BudgetStore>> {
    match &settings.remote {
        Some(remote) => {
            let store = RemoteStore::open(&remote.url, session)
                .with_context(|| format!("Failed to open remote store: {}", remote.url))?;
            info!(url = %remote.url, "Using remote budget store");
            Ok(Box::new(store))
        }
        None => {
            let path = settings.data_dir.join(LOCAL_STORAGE_NAME);
            let store = LocalStore::open(&path);
            info!(path = %path.display(), "Using local budget store");
            Ok(Box::new(store))
        }
    }
}
