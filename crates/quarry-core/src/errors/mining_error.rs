//! Mining errors.

use super::error_code::{self, QuarryErrorCode};

/// Errors raised by a rule miner.
#[derive(Debug, thiserror::Error)]
pub enum MiningError {
    #[error("Invalid {name} threshold {value}: must be in (0, 1]")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("Invalid max itemset length {0}: must be at least 2")]
    InvalidMaxLength(usize),

    #[error("Mining engine failed: {0}")]
    Engine(String),
}

impl QuarryErrorCode for MiningError {
    fn error_code(&self) -> &'static str {
        error_code::MINING_ERROR
    }
}
