//! Graph store configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CONNECT_RETRIES, DEFAULT_DATABASE, DEFAULT_RETRY_BACKOFF_MS};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database path. Default: `quarry.db`.
    pub database: Option<String>,
    /// Retries after a transient open failure. Default: 3.
    pub connect_retries: Option<u32>,
    /// Initial backoff in milliseconds, doubled per retry. Default: 200.
    pub retry_backoff_ms: Option<u64>,
}

impl StorageConfig {
    pub fn effective_database(&self) -> PathBuf {
        PathBuf::from(self.database.as_deref().unwrap_or(DEFAULT_DATABASE))
    }

    pub fn effective_connect_retries(&self) -> u32 {
        self.connect_retries.unwrap_or(DEFAULT_CONNECT_RETRIES)
    }

    pub fn effective_retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.unwrap_or(DEFAULT_RETRY_BACKOFF_MS))
    }
}
