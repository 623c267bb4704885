//! Survey summarizer port - the external summary generator.
//!
//! The crate never generates summaries itself. It hands the anonymous
//! response set to this port and stores whatever comes back, after
//! validation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::SurveyId;
use crate::domain::survey::{Question, Response, SummaryDraft, SurveyTemplateType};

/// Everything the summarizer is allowed to see about a survey.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub survey_id: SurveyId,
    pub template: SurveyTemplateType,
    pub title: String,
    pub questions: Vec<Question>,
    pub responses: Vec<Response>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummarizerError {
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    #[error("summarizer unavailable: {0}")]
    Unavailable(String),

    #[error("summarizer returned unusable output: {0}")]
    InvalidOutput(String),
}

#[async_trait]
pub trait SurveySummarizer: Send + Sync {
    async fn summarize(&self, request: SummaryRequest) -> Result<SummaryDraft, SummarizerError>;
}
