//! Retry with exponential backoff for transient open failures.

use std::path::Path;
use std::thread;
use std::time::Duration;

use quarry_core::config::StorageConfig;
use quarry_core::errors::StorageError;
use rusqlite::ErrorCode;

/// Busy, locked, or unopenable databases may recover on their own.
pub fn is_transient(e: &rusqlite::Error) -> bool {
    matches!(
        e.sqlite_error_code(),
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked | ErrorCode::CannotOpen)
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one.
    pub retries: u32,
    /// Delay before the first retry; doubled for each one after.
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(retries: u32, initial_backoff: Duration) -> Self {
        Self {
            retries,
            initial_backoff,
        }
    }

    /// No retries.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Delay before retry number `retry` (1-based).
    pub fn delay(&self, retry: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(1u32 << (retry.saturating_sub(1)).min(16))
    }

    /// Run `op` until it succeeds, fails permanently, or retries run out.
    pub fn run<T, F>(&self, path: &Path, mut op: F) -> Result<T, StorageError>
    where
        F: FnMut() -> Result<T, StorageError>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match op() {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt <= self.retries => {
                    let delay = self.delay(attempt);
                    tracing::warn!(
                        path = %path.display(),
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "store unavailable, retrying"
                    );
                    thread::sleep(delay);
                }
                Err(e) if e.is_transient() => {
                    return Err(StorageError::ConnectionFailed {
                        path: path.display().to_string(),
                        attempts: attempt,
                        message: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl From<&StorageConfig> for RetryPolicy {
    fn from(config: &StorageConfig) -> Self {
        Self::new(
            config.effective_connect_retries(),
            config.effective_retry_backoff(),
        )
    }
}
