//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("max_attempts must be at least 1")]
    InvalidMaxAttempts,

    #[error("max_turn_steps must be at least 1")]
    InvalidMaxTurnSteps,

    #[error("history_window must be at least 1")]
    InvalidHistoryWindow,
}
