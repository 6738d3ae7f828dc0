//! Query modules, one per part of the graph.

pub mod rule_graph;
pub mod source;
pub mod transaction_graph;
