//! Configuration system for Quarry.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod extraction_config;
pub mod mining_config;
pub mod output_config;
pub mod quarry_config;
pub mod storage_config;

pub use extraction_config::ExtractionConfig;
pub use mining_config::MiningConfig;
pub use output_config::OutputConfig;
pub use quarry_config::{CliOverrides, QuarryConfig};
pub use storage_config::StorageConfig;
