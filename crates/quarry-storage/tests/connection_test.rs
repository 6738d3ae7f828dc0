//! Store connection tests: pragmas, migrations, retrying open.

use std::time::Duration;

use quarry_core::errors::StorageError;
use quarry_storage::connection::pragmas::verify_wal_mode;
use quarry_storage::migrations::{self, LATEST_VERSION};
use quarry_storage::{DatabaseManager, RetryPolicy};
use tempfile::TempDir;

#[test]
fn pragmas_set_on_file_database() {
    let dir = TempDir::new().unwrap();
    let db = DatabaseManager::open(&dir.path().join("quarry.db")).unwrap();

    db.with_conn(|conn| {
        assert!(verify_wal_mode(conn)?);

        let fk: i64 = conn
            .pragma_query_value(None, "foreign_keys", |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1, "foreign_keys should be ON");

        let timeout: i64 = conn
            .pragma_query_value(None, "busy_timeout", |row| row.get(0))
            .unwrap();
        assert_eq!(timeout, 5000);
        Ok(())
    })
    .unwrap();
}

#[test]
fn migrations_reach_latest_and_rerun_cleanly() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("quarry.db");

    {
        let db = DatabaseManager::open(&path).unwrap();
        db.with_conn(|conn| {
            assert_eq!(migrations::current_version(conn)?, LATEST_VERSION);
            Ok(())
        })
        .unwrap();
    }

    // Reopening must not re-apply or fail.
    let db = DatabaseManager::open(&path).unwrap();
    db.with_conn(|conn| {
        migrations::run_migrations(conn)?;
        assert_eq!(migrations::current_version(conn)?, LATEST_VERSION);
        Ok(())
    })
    .unwrap();
    assert_eq!(db.path(), Some(path.as_path()));
}

#[test]
fn unopenable_path_exhausts_retries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("deeper").join("quarry.db");
    let policy = RetryPolicy::new(2, Duration::from_millis(1));

    match DatabaseManager::open_with_retry(&path, &policy) {
        Err(StorageError::ConnectionFailed { attempts, .. }) => assert_eq!(attempts, 3),
        Err(other) => panic!("expected ConnectionFailed, got {other}"),
        Ok(_) => panic!("opening under a missing directory should fail"),
    }
}

#[test]
fn in_memory_has_no_path() {
    let db = DatabaseManager::open_in_memory().unwrap();
    assert!(db.path().is_none());
}
