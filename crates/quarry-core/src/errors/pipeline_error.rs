//! Pipeline errors.

use super::error_code::QuarryErrorCode;
use super::{ConfigError, ImportError, MiningError, OutputError, StorageError};

/// Fatal errors that abort a run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Mining error: {0}")]
    Mining(#[from] MiningError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("Import error: {0}")]
    Import(#[from] ImportError),
}

impl QuarryErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Mining(e) => e.error_code(),
            Self::Output(e) => e.error_code(),
            Self::Import(e) => e.error_code(),
        }
    }
}
