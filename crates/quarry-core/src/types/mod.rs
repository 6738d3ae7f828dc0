//! Domain types shared across the workspace.

pub mod collections;
pub mod document;
pub mod rule;
pub mod transaction;

pub use document::{DocId, DocumentRecord};
pub use rule::Rule;
pub use transaction::Transaction;
