use std::{path::Path, str::FromStr, time::Duration};

use serde::Deserialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::{backend::SqliteKeyValueStore, StorageError};

pub const DATABASE_ENV: &str = "TCG_JOURNAL_DATABASE";
pub const DEFAULT_DATABASE: &str = "tcg_journal.db";

/// Where the SQLite backing store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub url: String,
    pub pool_size: u32,
}

impl StoreConfig {
    /// CLI argument, then `TCG_JOURNAL_DATABASE`, then the config file, then
    /// `tcg_journal.db` in the working directory.
    pub fn from_cli_or_env_or_yaml(cli_arg: Option<String>, yaml_config: Option<String>) -> Self {
        Self::resolve(cli_arg, std::env::var(DATABASE_ENV).ok(), yaml_config)
    }

    fn resolve(cli_arg: Option<String>, env: Option<String>, yaml_config: Option<String>) -> Self {
        let url = cli_arg
            .or(env)
            .or(yaml_config)
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        Self { url, pool_size: 4 }
    }

    /// Accepts either a `sqlite:` URL or a plain file path; the file is
    /// created if missing.
    pub async fn connect(&self) -> Result<SqliteKeyValueStore, StorageError> {
        let options = if self.url.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(&self.url)
                .map_err(|e| StorageError::Connection(e.to_string()))?
        } else {
            SqliteConnectOptions::new().filename(&self.url)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(self.pool_size)
            .connect_with(options.create_if_missing(true))
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        SqliteKeyValueStore::connect(pool).await
    }
}

/// The optional YAML config file.
///
/// ```yaml
/// database: /data/tcg_journal.db
/// retries: 3
/// retry_delay_ms: 200
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    pub database: Option<String>,
    pub retries: usize,
    pub retry_delay_ms: u64,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            database: None,
            retries: 3,
            retry_delay_ms: 200,
        }
    }
}

impl JournalConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, StorageError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}
