//! Output artifact configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_OUTPUT_DIR, DEFAULT_RULES_FILE, DEFAULT_TRANSACTIONS_FILE};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the dump and report. Default: `output`.
    pub dir: Option<String>,
    /// Default: `transactions.csv`.
    pub transactions_file: Option<String>,
    /// Default: `rules.txt`.
    pub rules_file: Option<String>,
}

impl OutputConfig {
    pub fn effective_dir(&self) -> PathBuf {
        PathBuf::from(self.dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR))
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.effective_dir().join(
            self.transactions_file
                .as_deref()
                .unwrap_or(DEFAULT_TRANSACTIONS_FILE),
        )
    }

    pub fn rules_path(&self) -> PathBuf {
        self.effective_dir()
            .join(self.rules_file.as_deref().unwrap_or(DEFAULT_RULES_FILE))
    }
}
