//! Survey domain module.
//!
//! Handles the anonymity-gated survey lifecycle: creation from a template,
//! anonymous response intake, threshold-based result visibility, summary
//! attachment, and closing.
//!
//! # Events
//!
//! - `SurveyCreated` - Published when an owner creates a survey
//! - `ResponseRecorded` - Published after each committed response
//! - `ResultsUnlocked` - Published when the threshold is reached
//! - `SummaryAttached` - Published when a summary is stored
//! - `SurveyClosed` - Published when a survey is closed

mod aggregate;
mod errors;
mod events;
mod question;
mod response;
mod share_token;
mod status;
mod summary;
mod template;

pub use aggregate::{
    AcceptedResponse, NewSurvey, Survey, MAX_QUESTIONS, MAX_TITLE_LENGTH, MIN_QUESTIONS,
    MIN_TITLE_LENGTH,
};
pub use errors::SurveyError;
pub use events::{ResponseRecorded, ResultsUnlocked, SummaryAttached, SurveyClosed, SurveyCreated};
pub use question::{
    Question, QuestionDraft, QuestionFormat, QuestionType, DEFAULT_RATING_MAX, DEFAULT_RATING_MIN,
};
pub use response::{Answer, AnswerInput, Response};
pub use share_token::{ShareToken, SHARE_TOKEN_LENGTH};
pub use status::SurveyState;
pub use summary::{ActionableInsight, Priority, Sentiment, SummaryDraft, SurveySummary};
pub use template::{SurveyTemplateType, TemplateCatalog, TemplateCatalogError};

#[cfg(test)]
pub(crate) use aggregate::test_support;
