//! Rule mining configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_LENGTH, DEFAULT_MIN_CONFIDENCE, DEFAULT_MIN_SUPPORT};

/// Thresholds handed to the mining engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MiningConfig {
    /// Minimum fraction of transactions containing an itemset. Default: 0.0005.
    pub min_support: Option<f64>,
    /// Minimum P(rhs | lhs) for a rule. Default: 0.5.
    pub min_confidence: Option<f64>,
    /// Largest itemset size mined. Default: 8.
    pub max_length: Option<usize>,
}

impl MiningConfig {
    pub fn effective_min_support(&self) -> f64 {
        self.min_support.unwrap_or(DEFAULT_MIN_SUPPORT)
    }

    pub fn effective_min_confidence(&self) -> f64 {
        self.min_confidence.unwrap_or(DEFAULT_MIN_CONFIDENCE)
    }

    pub fn effective_max_length(&self) -> usize {
        self.max_length.unwrap_or(DEFAULT_MAX_LENGTH)
    }
}
