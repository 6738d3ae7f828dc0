//! quarry-core: shared foundation for the Quarry multi-level rule miner.
//!
//! - `label`: label paths and the `/`-separated label helpers
//! - `types`: documents, transactions, and association rules
//! - `errors`: one error enum per subsystem
//! - `config`: layered TOML configuration
//! - `tracing`: `tracing-subscriber` setup

pub mod config;
pub mod constants;
pub mod errors;
pub mod label;
pub mod tracing;
pub mod types;

pub use config::QuarryConfig;
pub use label::{short_name, top_level, LabelPath};
pub use types::{DocId, DocumentRecord, Rule, Transaction};
