//! Write transactions.

use quarry_core::errors::StorageError;
use rusqlite::{Connection, Transaction, TransactionBehavior};

use super::to_storage_err;

/// Execute a write operation inside a BEGIN IMMEDIATE transaction.
///
/// The write lock is taken up front so a concurrent writer fails at BEGIN
/// rather than mid-rebuild. Any error from `f` rolls everything back.
pub fn with_immediate_transaction<F, T>(conn: &Connection, f: F) -> Result<T, StorageError>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, StorageError>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(to_storage_err)?;

    let result = f(&tx)?;

    tx.commit().map_err(to_storage_err)?;
    Ok(result)
}
