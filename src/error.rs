use thiserror::Error;

use crate::simulator::GuidanceMode;

/// Errors produced by the guidance simulator and its configuration layer
#[derive(Debug, Error)]
pub enum GuidanceError {
    /// Operation requires a different mode than the current one
    #[error("Invalid guidance state: expected {expected:?}, found {found:?}")]
    InvalidState {
        expected: GuidanceMode,
        found: GuidanceMode,
    },

    /// Configuration failed validation
    #[error("Invalid simulator configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file could not be read
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// No async runtime available to drive the timers
    #[error("Async runtime unavailable: {0}")]
    Runtime(String),
}

impl From<tokio::runtime::TryCurrentError> for GuidanceError {
    fn from(err: tokio::runtime::TryCurrentError) -> Self {
        GuidanceError::Runtime(err.to_string())
    }
}

/// Result type for guidance operations
pub type GuidanceResult<T> = Result<T, GuidanceError>;
