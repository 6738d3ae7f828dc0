//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::BTreeMap;

/// SmallVec sized for mined itemsets (rarely longer than 4 labels).
pub type SmallVec4<T> = SmallVec<[T; 4]>;
