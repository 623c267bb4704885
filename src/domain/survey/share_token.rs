//! Share tokens: the public, URL-safe handle respondents use to reach a survey.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Random bytes behind every token.
pub const SHARE_TOKEN_BYTES: usize = 16;

/// Length of the encoded token (16 bytes, base64url without padding).
pub const SHARE_TOKEN_LENGTH: usize = 22;

/// URL-safe survey share token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareToken(String);

impl ShareToken {
    /// Generates a fresh token from the OS random number generator.
    pub fn generate() -> Self {
        let mut bytes = [0u8; SHARE_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Parses a token received from outside, checking length and alphabet.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::empty_field("share_token"));
        }
        if raw.len() != SHARE_TOKEN_LENGTH {
            return Err(ValidationError::invalid_format(
                "share_token",
                format!("expected {} characters, got {}", SHARE_TOKEN_LENGTH, raw.len()),
            ));
        }
        if !raw
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(ValidationError::invalid_format(
                "share_token",
                "only A-Z, a-z, 0-9, '-' and '_' are allowed",
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the public link for this token under `base_url`.
    pub fn share_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
