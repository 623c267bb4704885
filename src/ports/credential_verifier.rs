//! Credential verifier port.
//!
//! The authentication collaborator. Given an email and password it either
//! returns the verified `Identity` or explains why it could not.
//!
//! # Contract
//!
//! Implementations must:
//! - Return `AuthError::InvalidCredentials` for a wrong password and for an
//!   unknown email alike
//! - Return `AuthError::ServiceUnavailable` for transient errors
//! - Never log the password

use async_trait::async_trait;
use secrecy::SecretString;

use crate::domain::foundation::{AuthError, Identity};

#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify_credentials(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Identity, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_verifier_is_object_safe() {
        fn _accepts_dyn(_verifier: &dyn CredentialVerifier) {}
    }
}
