//! Anonymous survey responses.
//!
//! Neither type here has a field for who answered. Submissions arrive through
//! an `IntakeContext`, which carries no identity either.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{QuestionId, ResponseId, SurveyId, Timestamp};

/// One answer as submitted by a respondent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerInput {
    pub question_id: QuestionId,
    pub value: String,
}

impl AnswerInput {
    pub fn new(question_id: QuestionId, value: impl Into<String>) -> Self {
        Self {
            question_id,
            value: value.into(),
        }
    }
}

/// A validated answer stored with its response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    question_id: QuestionId,
    value: String,
}

impl Answer {
    pub(crate) fn new(question_id: QuestionId, value: String) -> Self {
        Self { question_id, value }
    }

    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A complete, accepted answer set. Answers are ordered by question order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    id: ResponseId,
    survey_id: SurveyId,
    submitted_at: Timestamp,
    answers: Vec<Answer>,
}

impl Response {
    pub(crate) fn new(survey_id: SurveyId, answers: Vec<Answer>) -> Self {
        Self {
            id: ResponseId::new(),
            survey_id,
            submitted_at: Timestamp::now(),
            answers,
        }
    }

    pub fn id(&self) -> ResponseId {
        self.id
    }

    pub fn survey_id(&self) -> SurveyId {
        self.survey_id
    }

    pub fn submitted_at(&self) -> &Timestamp {
        &self.submitted_at
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }
}
