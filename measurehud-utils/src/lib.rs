//! MeasureHUD Utilities
//!
//! Shared plumbing for the MeasureHUD crates: the error type used by the
//! configuration loader, logging setup on top of `tracing`, configuration
//! files in TOML/JSON/YAML, and width-aware string helpers for terminal
//! rendering.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod config;
pub mod logging;
pub mod string;

pub use config::{load_config, merge_configs, ConfigBuilder};
pub use logging::{get_logger, init_logging, LogLevel, Logger, LoggerConfig};
pub use string::{display_width, safe_truncate};

/// Result type used throughout MeasureHUD utilities
pub type Result<T> = std::result::Result<T, UtilError>;

/// Error types for utility operations
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}
