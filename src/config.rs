use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub(crate) const SETTINGS_FILE: &str = "settings.json";
pub(crate) const DEFAULT_CURRENCY: &str = "Ksh";

/// Credentials for the shared remote table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RemoteSettings {
    /// Location of the shared database.
    pub(crate) url: String,
    /// Access credential. Only its presence is checked: together with `url`
    /// it selects the remote store. The SQLite connection takes no key.
    pub(crate) key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) data_dir: PathBuf,
    pub(crate) remote: Option<RemoteSettings>,
    pub(crate) owner_id: Option<String>,
    pub(crate) currency: String,
}

/// On-disk shape of `settings.json`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    remote_url: Option<String>,
    remote_key: Option<String>,
    owner_id: Option<String>,
    currency: Option<String>,
}

impl Settings {
    /// Resolve settings: defaults, then `settings.json` in the data
    /// directory, then `BUDGET_*` environment variables.
    pub(crate) fn load() -> Result<Self> {
        Self::resolve(|name| std::env::var(name).ok())
    }

    pub(crate) fn resolve(env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_dir = match non_empty(env("BUDGET_DATA_DIR")) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let file = read_settings_file(&data_dir.join(SETTINGS_FILE))?;

        let url = non_empty(env("BUDGET_REMOTE_URL")).or(non_empty(file.remote_url));
        let key = non_empty(env("BUDGET_REMOTE_KEY")).or(non_empty(file.remote_key));
        let remote = match (url, key) {
            (Some(url), Some(key)) => Some(RemoteSettings { url, key }),
            _ => None,
        };

        Ok(Self {
            data_dir,
            remote,
            owner_id: non_empty(env("BUDGET_OWNER_ID")).or(non_empty(file.owner_id)),
            currency: non_empty(env("BUDGET_CURRENCY"))
                .or(non_empty(file.currency))
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn read_settings_file(path: &Path) -> Result<SettingsFile> {
    if !path.exists() {
        return Ok(SettingsFile::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid settings file: {}", path.display()))
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "budgetwise", "Budgetwise")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}
