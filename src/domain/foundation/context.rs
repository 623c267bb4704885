//! Request contexts passed explicitly into every lifecycle operation.
//!
//! Owner operations take an `OwnerContext` carrying a verified identity.
//! Submissions take an `IntakeContext`, which has no identity field at all,
//! so nothing about a respondent can flow into a stored response.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Identity, UserId};

/// Context for operations performed by an authenticated survey owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerContext {
    identity: Identity,

    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Where the call came from (e.g., "app", "scheduler").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl OwnerContext {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            correlation_id: None,
            source: None,
        }
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn user_id(&self) -> &UserId {
        &self.identity.user_id
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// Context for anonymous response intake.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Intake channel (e.g., "share_link", "qr").
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<String>,
}

impl IntakeContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }
}

#[cfg(test)]
impl OwnerContext {
    /// Test fixture for an owner with a fixed id.
    pub fn test_fixture() -> Self {
        Self::new(Identity::test_fixture())
            .with_correlation_id("test-correlation-id")
            .with_source("test")
    }
}
