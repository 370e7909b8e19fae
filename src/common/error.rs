//! Error types for the application.

use thiserror::Error;

use crate::common::types::TravelerId;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Errors surfaced by the traveler driver.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Traveler {traveler} task panicked before leaving the bridge")]
    TravelerPanicked { traveler: TravelerId },

    #[error("Traveler {traveler} task was cancelled before leaving the bridge")]
    TravelerCancelled { traveler: TravelerId },
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
