//! Association rules produced by the miner.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::label::{short_name, top_level};

use super::collections::FxHashSet;

/// `lhs -> rhs` with its strength measures.
///
/// `lhs` and `rhs` are disjoint and each sorted lexically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub lhs: Vec<String>,
    pub rhs: Vec<String>,
    /// Fraction of transactions containing `lhs ∪ rhs`.
    pub support: f64,
    /// support(lhs ∪ rhs) / support(lhs).
    pub confidence: f64,
    /// confidence / support(rhs).
    pub lift: f64,
}

impl Rule {
    /// All labels of the rule, antecedent first.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.lhs.iter().chain(self.rhs.iter()).map(String::as_str)
    }

    /// True when two labels of the rule fall under the same top-level category.
    pub fn repeats_top_level(&self) -> bool {
        let mut seen = FxHashSet::default();
        self.labels().any(|label| !seen.insert(top_level(label)))
    }

    /// `a, b -> c` using full labels.
    pub fn full_name(&self) -> String {
        format!("{} -> {}", self.lhs.join(", "), self.rhs.join(", "))
    }

    /// `a, b -> c` using only the leaf segment of each label.
    pub fn short_name(&self) -> String {
        let join = |side: &[String]| {
            side.iter()
                .map(|label| short_name(label))
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!("{} -> {}", join(&self.lhs), join(&self.rhs))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}
