//! Corpus import errors.

use super::error_code::{self, QuarryErrorCode};

/// Errors loading a JSON Lines corpus into the store.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON on line {line}: {message}")]
    Json { line: usize, message: String },
}

impl QuarryErrorCode for ImportError {
    fn error_code(&self) -> &'static str {
        error_code::IMPORT_ERROR
    }
}
