//! Storage errors.

use super::error_code::{self, QuarryErrorCode};

/// Errors raised by the graph store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Database busy or unavailable: {message}")]
    Busy { message: String },

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Could not open store at {path} after {attempts} attempts: {message}")]
    ConnectionFailed {
        path: String,
        attempts: u32,
        message: String,
    },

    #[error("Malformed record {record}: {message}")]
    MalformedRecord { record: String, message: String },
}

impl StorageError {
    /// Lock contention or an unopenable file; worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }

    /// Wrap any displayable SQLite error.
    pub fn sqlite(e: impl std::fmt::Display) -> Self {
        Self::SqliteError {
            message: e.to_string(),
        }
    }
}

impl QuarryErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SqliteError { .. } => error_code::STORAGE_ERROR,
            Self::Busy { .. } => error_code::DB_BUSY,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::ConnectionFailed { .. } => error_code::CONNECTION_FAILED,
            Self::MalformedRecord { .. } => error_code::MALFORMED_RECORD,
        }
    }
}
