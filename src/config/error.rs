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
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid inquiry API URL format")]
    InvalidApiUrl,

    #[error("Invalid placeholder email address")]
    InvalidPlaceholderEmail,

    #[error("Rate limit must allow at least one submission per non-empty window")]
    InvalidRateLimit,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
