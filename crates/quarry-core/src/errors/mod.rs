//! Error handling for Quarry.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod import_error;
pub mod mining_error;
pub mod output_error;
pub mod pipeline_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use error_code::QuarryErrorCode;
pub use import_error::ImportError;
pub use mining_error::MiningError;
pub use output_error::OutputError;
pub use pipeline_error::PipelineError;
pub use storage_error::StorageError;
