//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ECHOWAVE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use echowave::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Share links start with {}", config.lifecycle.share_base_url);
//! ```

mod auth;
mod error;
mod lifecycle;
mod logging;

pub use auth::{AuthConfig, MIN_PEPPER_LENGTH};
pub use error::{ConfigError, ValidationError};
pub use lifecycle::LifecycleConfig;
pub use logging::{LogFormat, LoggingConfig};

use std::path::Path;

use serde::Deserialize;

const ENV_PREFIX: &str = "ECHOWAVE";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Survey creation and share link settings
    #[serde(default)]
    pub lifecycle: LifecycleConfig,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Credential store settings
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ECHOWAVE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ECHOWAVE__LIFECYCLE__SHARE_TOKEN_ATTEMPTS=8` -> `lifecycle.share_token_attempts = 8`
    /// - `ECHOWAVE__AUTH__CREDENTIAL_PEPPER=...` -> `auth.credential_pepper = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load a YAML or TOML file with environment variables layered on top.
    ///
    /// The format is picked from the file extension.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.lifecycle.validate()?;
        self.logging.validate()?;
        self.auth.validate()?;
        Ok(())
    }
}

fn environment() -> config::Environment {
    config::Environment::default()
        .prefix(ENV_PREFIX)
        .separator("__")
}
