//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Shortest pepper accepted for credential digests.
pub const MIN_PEPPER_LENGTH: usize = 16;

/// Authentication configuration for the credential store
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// HMAC key mixed into every stored password digest
    pub credential_pepper: SecretString,
}

impl AuthConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let pepper = self.credential_pepper.expose_secret();
        if pepper.is_empty() {
            return Err(ValidationError::MissingRequired("CREDENTIAL_PEPPER"));
        }
        if pepper.chars().count() < MIN_PEPPER_LENGTH {
            return Err(ValidationError::PepperTooShort(MIN_PEPPER_LENGTH));
        }
        Ok(())
    }
}
