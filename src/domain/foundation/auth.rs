//! Authentication types for the domain layer.
//!
//! An `Identity` is what the credential collaborator hands back after a
//! successful sign-in. It has no provider-specific fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::UserId;

/// Verified identity of a survey owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,

    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Identity {
    pub fn new(user_id: UserId, email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            display_name,
        }
    }

    /// Returns the display name, or the local part of the email as fallback.
    pub fn display_name_or_default(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.email.split('@').next().unwrap_or(&self.email),
        }
    }
}

/// Errors raised while verifying owner credentials.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Email/password pair did not match.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    /// Registration with an email that already has an account.
    #[error("Email is already registered")]
    EmailTaken,

    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

#[cfg(test)]
impl Identity {
    pub fn test_fixture() -> Self {
        Self::new(
            UserId::new("owner-1").unwrap(),
            "owner@example.com",
            Some("Owner".to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_email_local_part() {
        let identity = Identity::new(UserId::new("u-1").unwrap(), "jo@example.com", None);
        assert_eq!(identity.display_name_or_default(), "jo");
    }

    #[test]
    fn blank_display_name_is_ignored() {
        let identity = Identity::new(
            UserId::new("u-1").unwrap(),
            "sam@example.com",
            Some("  ".to_string()),
        );
        assert_eq!(identity.display_name_or_default(), "sam");
    }

    #[test]
    fn only_service_unavailable_is_transient() {
        assert!(AuthError::service_unavailable("down").is_transient());
        assert!(!AuthError::InvalidCredentials.is_transient());
        assert!(!AuthError::UserNotFound.is_transient());
        assert!(!AuthError::EmailTaken.is_transient());
    }
}
