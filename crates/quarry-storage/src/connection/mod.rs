//! Connection management: one serialized connection, opened with retries.

pub mod pragmas;
pub mod retry;
pub mod writer;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use quarry_core::errors::StorageError;
use rusqlite::Connection;

pub use self::retry::RetryPolicy;
use self::pragmas::apply_pragmas;
use crate::migrations;

/// Map a rusqlite error, keeping transient failures distinguishable.
pub fn to_storage_err(e: rusqlite::Error) -> StorageError {
    if retry::is_transient(&e) {
        StorageError::Busy {
            message: e.to_string(),
        }
    } else {
        StorageError::SqliteError {
            message: e.to_string(),
        }
    }
}

/// Owns the store connection. Runs are single-writer; the mutex only
/// serializes callers sharing one manager.
pub struct DatabaseManager {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a database at the given path, apply pragmas, run migrations.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(to_storage_err)?;
        apply_pragmas(&conn)?;
        migrations::run_migrations(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open with `policy`, retrying transient failures with backoff.
    pub fn open_with_retry(path: &Path, policy: &RetryPolicy) -> Result<Self, StorageError> {
        policy.run(path, || Self::open(path))
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(to_storage_err)?;
        apply_pragmas(&conn)?;
        migrations::run_migrations(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Execute an operation with the store connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self.conn.lock().map_err(|_| StorageError::SqliteError {
            message: "connection lock poisoned".to_string(),
        })?;
        f(&guard)
    }

    /// Get the database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
