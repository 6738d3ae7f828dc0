//! Top-level Quarry configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ExtractionConfig, MiningConfig, OutputConfig, StorageConfig};
use crate::constants::{
    DEFAULT_DATABASE, DEFAULT_IGNORED_LABELS, DEFAULT_OUTPUT_DIR, DEFAULT_RETRY_BACKOFF_MS,
    DEFAULT_RULES_FILE, DEFAULT_TRANSACTIONS_FILE,
};
use crate::errors::ConfigError;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "quarry.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`QUARRY_*`)
/// 3. Project config (`quarry.toml` in project root)
/// 4. User config (`~/.quarry/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QuarryConfig {
    pub mining: MiningConfig,
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
    pub storage: StorageConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub min_support: Option<f64>,
    pub min_confidence: Option<f64>,
    pub max_length: Option<usize>,
    pub database: Option<String>,
    pub output_dir: Option<String>,
}

impl QuarryConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // User config: parse errors are fatal, unreadable files are not.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &QuarryConfig) -> Result<(), ConfigError> {
        for (field, value) in [
            ("mining.min_support", config.mining.min_support),
            ("mining.min_confidence", config.mining.min_confidence),
        ] {
            if let Some(v) = value {
                if !(v > 0.0 && v <= 1.0) {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be greater than 0.0 and at most 1.0".to_string(),
                    });
                }
            }
        }
        if let Some(max_length) = config.mining.max_length {
            if max_length < 2 {
                return Err(ConfigError::ValidationFailed {
                    field: "mining.max_length".to_string(),
                    message: "must be at least 2".to_string(),
                });
            }
        }
        if let Some(retries) = config.storage.connect_retries {
            if retries > 10 {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.connect_retries".to_string(),
                    message: "must be at most 10".to_string(),
                });
            }
        }
        if let Some(ref dir) = config.output.dir {
            if dir.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "output.dir".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.quarry/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".quarry").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut QuarryConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: QuarryConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` win.
    fn merge(base: &mut QuarryConfig, other: &QuarryConfig) {
        // Mining
        if other.mining.min_support.is_some() {
            base.mining.min_support = other.mining.min_support;
        }
        if other.mining.min_confidence.is_some() {
            base.mining.min_confidence = other.mining.min_confidence;
        }
        if other.mining.max_length.is_some() {
            base.mining.max_length = other.mining.max_length;
        }

        // Extraction
        if other.extraction.ignored_labels.is_some() {
            base.extraction.ignored_labels = other.extraction.ignored_labels.clone();
        }

        // Output
        if other.output.dir.is_some() {
            base.output.dir = other.output.dir.clone();
        }
        if other.output.transactions_file.is_some() {
            base.output.transactions_file = other.output.transactions_file.clone();
        }
        if other.output.rules_file.is_some() {
            base.output.rules_file = other.output.rules_file.clone();
        }

        // Storage
        if other.storage.database.is_some() {
            base.storage.database = other.storage.database.clone();
        }
        if other.storage.connect_retries.is_some() {
            base.storage.connect_retries = other.storage.connect_retries;
        }
        if other.storage.retry_backoff_ms.is_some() {
            base.storage.retry_backoff_ms = other.storage.retry_backoff_ms;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `QUARRY_MIN_SUPPORT`, `QUARRY_DATABASE`, etc.
    /// Unlike unknown TOML keys, an unparsable value is an error.
    fn apply_env_overrides(config: &mut QuarryConfig) -> Result<(), ConfigError> {
        if let Some(v) = env_parse::<f64>("QUARRY_MIN_SUPPORT")? {
            config.mining.min_support = Some(v);
        }
        if let Some(v) = env_parse::<f64>("QUARRY_MIN_CONFIDENCE")? {
            config.mining.min_confidence = Some(v);
        }
        if let Some(v) = env_parse::<usize>("QUARRY_MAX_LENGTH")? {
            config.mining.max_length = Some(v);
        }
        if let Ok(val) = std::env::var("QUARRY_IGNORED_LABELS") {
            config.extraction.ignored_labels = Some(
                val.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            );
        }
        if let Ok(val) = std::env::var("QUARRY_OUTPUT_DIR") {
            config.output.dir = Some(val);
        }
        if let Ok(val) = std::env::var("QUARRY_DATABASE") {
            config.storage.database = Some(val);
        }
        if let Some(v) = env_parse::<u32>("QUARRY_CONNECT_RETRIES")? {
            config.storage.connect_retries = Some(v);
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut QuarryConfig, cli: &CliOverrides) {
        if let Some(v) = cli.min_support {
            config.mining.min_support = Some(v);
        }
        if let Some(v) = cli.min_confidence {
            config.mining.min_confidence = Some(v);
        }
        if let Some(v) = cli.max_length {
            config.mining.max_length = Some(v);
        }
        if let Some(ref v) = cli.database {
            config.storage.database = Some(v.clone());
        }
        if let Some(ref v) = cli.output_dir {
            config.output.dir = Some(v.clone());
        }
    }

    /// Copy of this config with every unset value replaced by its default.
    pub fn resolved(&self) -> Self {
        let ignored_labels = self.extraction.ignored_labels.clone().unwrap_or_else(|| {
            DEFAULT_IGNORED_LABELS.iter().map(|s| s.to_string()).collect()
        });
        let or_default = |value: &Option<String>, default: &str| {
            Some(value.clone().unwrap_or_else(|| default.to_string()))
        };

        Self {
            mining: MiningConfig {
                min_support: Some(self.mining.effective_min_support()),
                min_confidence: Some(self.mining.effective_min_confidence()),
                max_length: Some(self.mining.effective_max_length()),
            },
            extraction: ExtractionConfig {
                ignored_labels: Some(ignored_labels),
            },
            output: OutputConfig {
                dir: or_default(&self.output.dir, DEFAULT_OUTPUT_DIR),
                transactions_file: or_default(&self.output.transactions_file, DEFAULT_TRANSACTIONS_FILE),
                rules_file: or_default(&self.output.rules_file, DEFAULT_RULES_FILE),
            },
            storage: StorageConfig {
                database: or_default(&self.storage.database, DEFAULT_DATABASE),
                connect_retries: Some(self.storage.effective_connect_retries()),
                retry_backoff_ms: Some(
                    self.storage.retry_backoff_ms.unwrap_or(DEFAULT_RETRY_BACKOFF_MS),
                ),
            },
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_parse<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                field: key.to_string(),
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
