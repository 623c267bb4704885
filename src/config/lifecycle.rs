//! Survey lifecycle configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Settings for survey creation and sharing
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// Base URL respondents open; the share token is appended as a path segment
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,

    /// How many share tokens to try before giving up on a collision streak
    #[serde(default = "default_share_token_attempts")]
    pub share_token_attempts: u32,

    /// Threshold suggested for template-based surveys
    #[serde(default = "default_min_responses")]
    pub default_min_responses: u32,
}

impl LifecycleConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.share_base_url.is_empty() {
            return Err(ValidationError::MissingRequired("SHARE_BASE_URL"));
        }
        if !self.share_base_url.starts_with("http://") && !self.share_base_url.starts_with("https://") {
            return Err(ValidationError::InvalidShareBaseUrl);
        }
        if self.share_token_attempts == 0 {
            return Err(ValidationError::InvalidShareTokenAttempts);
        }
        if self.default_min_responses == 0 {
            return Err(ValidationError::InvalidDefaultMinResponses);
        }
        Ok(())
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            share_base_url: default_share_base_url(),
            share_token_attempts: default_share_token_attempts(),
            default_min_responses: default_min_responses(),
        }
    }
}

fn default_share_base_url() -> String {
    "http://localhost:3000/feedback".to_string()
}

fn default_share_token_attempts() -> u32 {
    5
}

fn default_min_responses() -> u32 {
    10
}
