//! Survey domain events.
//!
//! - `SurveyCreated` - New survey published
//! - `ResponseRecorded` - An anonymous response was counted
//! - `ResultsUnlocked` - The anonymity threshold was reached
//! - `SummaryAttached` - A summary was stored on the survey
//! - `SurveyClosed` - The survey stopped accepting responses
//!
//! None of these events carry anything about a respondent.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, EventId, SurveyId, Timestamp, UserId};
use crate::domain::survey::{Sentiment, SurveyTemplateType};

// ════════════════════════════════════════════════════════════════════════════
// SurveyCreated
// ════════════════════════════════════════════════════════════════════════════

/// Published when an owner creates a survey.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyCreated {
    pub event_id: EventId,
    pub survey_id: SurveyId,
    pub owner_id: UserId,
    pub template: SurveyTemplateType,
    pub title: String,
    pub question_count: usize,
    pub min_responses: u32,
    pub created_at: Timestamp,
}

domain_event!(
    SurveyCreated,
    event_type = "survey.created.v1",
    schema_version = 1,
    aggregate_id = survey_id,
    aggregate_type = "Survey",
    occurred_at = created_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// ResponseRecorded
// ════════════════════════════════════════════════════════════════════════════

/// Published after a response was committed.
///
/// `owner_id` names the survey owner so downstream handlers can credit them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseRecorded {
    pub event_id: EventId,
    pub survey_id: SurveyId,
    pub owner_id: UserId,

    /// Counter value after this response.
    pub response_count: u32,

    pub recorded_at: Timestamp,
}

domain_event!(
    ResponseRecorded,
    event_type = "survey.response_recorded.v1",
    schema_version = 1,
    aggregate_id = survey_id,
    aggregate_type = "Survey",
    occurred_at = recorded_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// ResultsUnlocked
// ════════════════════════════════════════════════════════════════════════════

/// Published once, by the response that reaches `min_responses`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsUnlocked {
    pub event_id: EventId,
    pub survey_id: SurveyId,
    pub owner_id: UserId,
    pub min_responses: u32,
    pub unlocked_at: Timestamp,
}

domain_event!(
    ResultsUnlocked,
    event_type = "survey.results_unlocked.v1",
    schema_version = 1,
    aggregate_id = survey_id,
    aggregate_type = "Survey",
    occurred_at = unlocked_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SummaryAttached
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryAttached {
    pub event_id: EventId,
    pub survey_id: SurveyId,
    pub owner_id: UserId,
    pub model: String,
    pub overall_sentiment: Sentiment,
    pub attached_at: Timestamp,
}

domain_event!(
    SummaryAttached,
    event_type = "survey.summary_attached.v1",
    schema_version = 1,
    aggregate_id = survey_id,
    aggregate_type = "Survey",
    occurred_at = attached_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// SurveyClosed
// ════════════════════════════════════════════════════════════════════════════

/// Published the first time a survey is closed. Repeated closes publish nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyClosed {
    pub event_id: EventId,
    pub survey_id: SurveyId,
    pub owner_id: UserId,
    pub response_count: u32,

    /// False when the survey closed before reaching its threshold.
    pub results_visible: bool,

    pub closed_at: Timestamp,
}

domain_event!(
    SurveyClosed,
    event_type = "survey.closed.v1",
    schema_version = 1,
    aggregate_id = survey_id,
    aggregate_type = "Survey",
    occurred_at = closed_at,
    event_id = event_id
);
