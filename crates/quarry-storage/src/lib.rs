//! quarry-storage: the graph store Quarry reads its corpus from and writes
//! its transaction and rule graphs back into.
//!
//! Nodes and relationships are SQLite tables. Rebuilds clear and repopulate
//! their part of the graph inside one immediate transaction.

pub mod connection;
pub mod migrations;
pub mod queries;

pub use connection::{DatabaseManager, RetryPolicy};
