//! Survey lifecycle error types.

use thiserror::Error;

use crate::domain::foundation::{AuthError, DomainError, ErrorCode, SurveyId};

/// Errors surfaced by every survey lifecycle operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurveyError {
    /// Input was rejected. Fix the input before retrying.
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    /// The survey no longer accepts responses.
    #[error("Survey {0} is closed")]
    Closed(SurveyId),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Operation is not yet allowed (e.g., results before the threshold).
    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Permission denied")]
    Forbidden,

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl SurveyError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SurveyError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        SurveyError::NotFound(what.into())
    }

    pub fn survey_not_found(id: SurveyId) -> Self {
        SurveyError::NotFound(format!("survey {}", id))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        SurveyError::Conflict(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SurveyError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SurveyError::Validation { .. } => ErrorCode::ValidationFailed,
            SurveyError::NotFound(_) => ErrorCode::SurveyNotFound,
            SurveyError::Closed(_) => ErrorCode::SurveyClosed,
            SurveyError::Conflict(_) => ErrorCode::SummaryAlreadyAttached,
            SurveyError::Precondition(_) => ErrorCode::ResultsLocked,
            SurveyError::Forbidden => ErrorCode::Forbidden,
            SurveyError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }

    /// True when the same call may succeed later without changing the input.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SurveyError::Precondition(_) | SurveyError::Infrastructure(_)
        )
    }
}

impl From<DomainError> for SurveyError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed | ErrorCode::InvalidStateTransition => {
                SurveyError::Validation {
                    field: err.detail("field").unwrap_or("unknown").to_string(),
                    message: err.message,
                }
            }
            ErrorCode::SurveyNotFound | ErrorCode::UserNotFound => {
                SurveyError::NotFound(err.message)
            }
            ErrorCode::SurveyClosed => match err.detail("survey_id").map(str::parse::<SurveyId>) {
                Some(Ok(id)) => SurveyError::Closed(id),
                _ => SurveyError::Conflict(err.message),
            },
            ErrorCode::SummaryAlreadyAttached
            | ErrorCode::ShareTokenTaken
            | ErrorCode::StaleWrite => SurveyError::Conflict(err.message),
            ErrorCode::ResultsLocked => SurveyError::Precondition(err.message),
            ErrorCode::Forbidden | ErrorCode::Unauthorized => SurveyError::Forbidden,
            ErrorCode::SummarizerFailed | ErrorCode::StorageError | ErrorCode::InternalError => {
                SurveyError::Infrastructure(err.to_string())
            }
        }
    }
}

impl From<AuthError> for SurveyError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::UserNotFound => SurveyError::Forbidden,
            AuthError::EmailTaken => SurveyError::conflict("email is already registered"),
            AuthError::ServiceUnavailable(msg) => SurveyError::Infrastructure(msg),
        }
    }
}
