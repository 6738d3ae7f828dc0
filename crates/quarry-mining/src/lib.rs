//! quarry-mining: the algorithmic core of Quarry.
//!
//! Label paths flow into [`HierarchyBuilder`] and [`TransactionBuilder`]
//! independently; transactions go through a [`RuleMiner`] (by default
//! [`Apriori`]); [`filter_and_rank`] drops same-branch rules and orders the
//! rest by lift.

pub mod apriori;
pub mod filter;
pub mod hierarchy;
pub mod miner;
pub mod report;
pub mod transactions;

pub use apriori::Apriori;
pub use filter::filter_and_rank;
pub use hierarchy::{Hierarchy, HierarchyBuilder};
pub use miner::{Itemset, MiningOutput, RuleMiner, Thresholds};
pub use transactions::{LeafEntry, LeafIndex, TransactionBuilder, TransactionSet};
