//! quarry-cli: wires the mining stages to the graph store.
//!
//! `pipeline` runs a full extract, mine, filter, persist pass.
//! `import` loads a JSON Lines corpus into the source tables.

pub mod import;
pub mod pipeline;

pub use import::import_corpus;
pub use pipeline::{Pipeline, RunSummary};
