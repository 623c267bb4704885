//! Survey repository port.
//!
//! Persists Survey aggregates together with the anonymous responses stored
//! beside them.
//!
//! # Atomicity
//!
//! `commit_response` is the only way the response counter changes. It writes
//! the updated survey and the new response as a single unit and refuses any
//! commit that does not move the stored counter forward by exactly one.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SurveyId, UserId};
use crate::domain::survey::{Response, ShareToken, Survey};

/// Repository port for Survey aggregate persistence.
#[async_trait]
pub trait SurveyRepository: Send + Sync {
    /// Store a newly created survey.
    ///
    /// # Errors
    ///
    /// - `ShareTokenTaken` if another survey already uses the token
    /// - `StorageError` on persistence failure
    async fn insert(&self, survey: &Survey) -> Result<(), DomainError>;

    /// Store changes that do not touch the response counter (close, summary).
    ///
    /// # Errors
    ///
    /// - `SurveyNotFound` if the survey doesn't exist
    /// - `StaleWrite` if the stored counter differs from the survey's
    async fn update(&self, survey: &Survey) -> Result<(), DomainError>;

    /// Atomically store the survey with its incremented counter and append the response.
    ///
    /// # Errors
    ///
    /// - `SurveyNotFound` if the survey doesn't exist
    /// - `SurveyClosed` if the stored survey is no longer active
    /// - `StaleWrite` unless `survey.response_count() == stored + 1`
    async fn commit_response(&self, survey: &Survey, response: &Response)
        -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &SurveyId) -> Result<Option<Survey>, DomainError>;

    async fn find_by_share_token(&self, token: &ShareToken) -> Result<Option<Survey>, DomainError>;

    async fn share_token_exists(&self, token: &ShareToken) -> Result<bool, DomainError>;

    /// Surveys owned by a user, newest first.
    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Survey>, DomainError>;

    /// Stored responses for a survey, in submission order.
    async fn responses_for(&self, id: &SurveyId) -> Result<Vec<Response>, DomainError>;

    /// Remove a survey that has no responses yet.
    ///
    /// Only used to undo a creation whose follow-up step failed.
    async fn delete(&self, id: &SurveyId) -> Result<(), DomainError>;
}
