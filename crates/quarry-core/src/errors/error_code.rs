//! QuarryErrorCode trait for operator-facing error reporting.

/// Every error enum provides a stable code string so the binary can report
/// `[CODE] message` on exit.
pub trait QuarryErrorCode {
    /// Returns the error code string (e.g., "STORAGE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted report string: `[ERROR_CODE] message`.
    fn report_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DB_BUSY: &str = "DB_BUSY";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const CONNECTION_FAILED: &str = "CONNECTION_FAILED";
pub const MALFORMED_RECORD: &str = "MALFORMED_RECORD";
pub const MINING_ERROR: &str = "MINING_ERROR";
pub const OUTPUT_ERROR: &str = "OUTPUT_ERROR";
pub const IMPORT_ERROR: &str = "IMPORT_ERROR";
