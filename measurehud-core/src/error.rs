//! Error type for model loading and collaborator setup

use thiserror::Error;

/// Result type used throughout MeasureHUD core
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] measurehud_utils::UtilError),

    #[error("Measure references unknown metric '{0}'")]
    UnknownMetric(String),

    #[error("Invalid color '{0}'")]
    InvalidColor(String),
}
