//! The mining engine seam.

use quarry_core::config::MiningConfig;
use quarry_core::errors::MiningError;
use quarry_core::types::{Rule, Transaction};
use serde::{Deserialize, Serialize};

/// Thresholds for one mining run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub min_support: f64,
    pub min_confidence: f64,
    /// Largest itemset size considered.
    pub max_length: usize,
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), MiningError> {
        for (name, value) in [
            ("support", self.min_support),
            ("confidence", self.min_confidence),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(MiningError::InvalidThreshold { name, value });
            }
        }
        if self.max_length < 2 {
            return Err(MiningError::InvalidMaxLength(self.max_length));
        }
        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::from(&MiningConfig::default())
    }
}

impl From<&MiningConfig> for Thresholds {
    fn from(config: &MiningConfig) -> Self {
        Self {
            min_support: config.effective_min_support(),
            min_confidence: config.effective_min_confidence(),
            max_length: config.effective_max_length(),
        }
    }
}

/// A frequent itemset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itemset {
    /// Sorted lexically.
    pub labels: Vec<String>,
    /// Number of transactions containing every label.
    pub count: usize,
    pub support: f64,
}

#[derive(Debug, Clone, Default)]
pub struct MiningOutput {
    pub itemsets: Vec<Itemset>,
    pub rules: Vec<Rule>,
}

/// Turns transactions into frequent itemsets and candidate rules.
///
/// Transactions are treated as label sets. Implementations must emit rules in
/// a deterministic order so that ranking ties are reproducible.
pub trait RuleMiner {
    fn mine(
        &self,
        transactions: &[Transaction],
        thresholds: &Thresholds,
    ) -> Result<MiningOutput, MiningError>;
}
