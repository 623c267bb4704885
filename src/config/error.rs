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

    #[error("Share base URL must start with http:// or https://")]
    InvalidShareBaseUrl,

    #[error("Share token attempts must be greater than zero")]
    InvalidShareTokenAttempts,

    #[error("Default minimum responses must be greater than zero")]
    InvalidDefaultMinResponses,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),

    #[error("Credential pepper must be at least {0} characters")]
    PepperTooShort(usize),
}
