use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{BudgetStore, StoreError};
use crate::models::{BudgetDatabase, MonthKey, MonthRecord};

/// File name of the single blob holding every month.
pub(crate) const LOCAL_STORAGE_NAME: &str = "budget_db_v3.json";

/// Single-user store: the whole database lives in one JSON blob, and every
/// save rewrites the full snapshot.
pub(crate) struct LocalStore {
    path: PathBuf,
    snapshot: BudgetDatabase,
}

impl LocalStore {
    /// Open the blob at `path`. A missing or unreadable blob starts an
    /// empty database rather than failing.
    pub(crate) fn open(path: &Path) -> Self {
        let snapshot = match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str::<BudgetDatabase>(&raw) {
                Ok(db) => db,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Malformed budget blob, starting empty");
                    BudgetDatabase::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No budget blob yet, starting empty");
                BudgetDatabase::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unreadable budget blob, starting empty");
                BudgetDatabase::new()
            }
        };
        Self {
            path: path.to_path_buf(),
            snapshot,
        }
    }

    fn write_snapshot(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.snapshot)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Write beside the blob and rename over it so readers never see a
        // half-written file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl BudgetStore for LocalStore {
    fn label(&self) -> &'static str {
        "local"
    }

    fn fetch(&mut self, key: &MonthKey) -> Result<Option<MonthRecord>, StoreError> {
        Ok(self.snapshot.get(key).cloned())
    }

    fn persist(&mut self, key: &MonthKey, record: &MonthRecord) -> Result<(), StoreError> {
        self.snapshot.insert(*key, record.clone());
        self.write_snapshot()?;
        debug!(month = %key, months = self.snapshot.len(), "Wrote local budget blob");
        Ok(())
    }
}
