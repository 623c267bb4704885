//! Survey aggregate entity.
//!
//! A survey owns its questions. Responses are stored beside it by the
//! repository; the survey only tracks how many were accepted.
//!
//! # Invariants
//!
//! - `min_responses > 0`
//! - `response_count` only grows, one accepted response at a time
//! - results are visible exactly when `response_count >= min_responses`
//! - once inactive, a survey never becomes active again
//! - a summary is attached at most once, and only after results are visible

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, OwnedByUser, QuestionId, StateMachine, SurveyId, Timestamp, UserId,
    ValidationError,
};
use crate::domain::survey::{
    Answer, AnswerInput, Question, QuestionDraft, Response, ShareToken, SummaryDraft,
    SurveyState, SurveySummary, SurveyTemplateType,
};

/// Minimum title length after trimming.
pub const MIN_TITLE_LENGTH: usize = 3;

/// Maximum title length.
pub const MAX_TITLE_LENGTH: usize = 500;

/// Fewest questions a survey may have.
pub const MIN_QUESTIONS: usize = 3;

/// Most questions a survey may have.
pub const MAX_QUESTIONS: usize = 10;

/// Input for creating a survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSurvey {
    pub template: SurveyTemplateType,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub min_responses: i64,
    pub questions: Vec<QuestionDraft>,
}

/// Outcome of accepting one response.
#[derive(Debug, Clone)]
pub struct AcceptedResponse {
    pub response: Response,
    /// True when this response is the one that reached the threshold.
    pub results_unlocked: bool,
}

/// Survey aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    id: SurveyId,
    owner_id: UserId,
    template: SurveyTemplateType,
    title: String,
    description: Option<String>,
    questions: Vec<Question>,
    min_responses: u32,
    share_token: ShareToken,
    response_count: u32,
    is_active: bool,
    summary: Option<SurveySummary>,
    created_at: Timestamp,
    results_unlocked_at: Option<Timestamp>,
    closed_at: Option<Timestamp>,
}

impl Survey {
    /// Creates a new open survey.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for a title shorter than 3 or longer than 500
    ///   characters, a question count outside 3..=10, an invalid question, or
    ///   a threshold below 1
    pub fn create(
        id: SurveyId,
        owner_id: UserId,
        share_token: ShareToken,
        input: NewSurvey,
    ) -> Result<Self, DomainError> {
        let title = Self::validate_title(&input.title)?;
        let min_responses = Self::validate_min_responses(input.min_responses)?;

        let count = input.questions.len();
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&count) {
            return Err(ValidationError::out_of_range(
                "questions",
                MIN_QUESTIONS as i64,
                MAX_QUESTIONS as i64,
                count as i64,
            )
            .into());
        }

        let questions = input
            .questions
            .into_iter()
            .enumerate()
            .map(|(order, draft)| Question::from_draft(QuestionId::new(), order, draft))
            .collect::<Result<Vec<_>, _>>()?;

        let description = input
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(Self {
            id,
            owner_id,
            template: input.template,
            title,
            description,
            questions,
            min_responses,
            share_token,
            response_count: 0,
            is_active: true,
            summary: None,
            created_at: Timestamp::now(),
            results_unlocked_at: None,
            closed_at: None,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> SurveyId {
        self.id
    }

    pub fn template(&self) -> SurveyTemplateType {
        self.template
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Questions in order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn min_responses(&self) -> u32 {
        self.min_responses
    }

    pub fn share_token(&self) -> &ShareToken {
        &self.share_token
    }

    pub fn response_count(&self) -> u32 {
        self.response_count
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn summary(&self) -> Option<&SurveySummary> {
        self.summary.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn results_unlocked_at(&self) -> Option<&Timestamp> {
        self.results_unlocked_at.as_ref()
    }

    pub fn closed_at(&self) -> Option<&Timestamp> {
        self.closed_at.as_ref()
    }

    /// True once the number of responses has reached the anonymity threshold.
    pub fn can_view_results(&self) -> bool {
        self.response_count >= self.min_responses
    }

    pub fn state(&self) -> SurveyState {
        match (self.is_active, self.can_view_results()) {
            (true, false) => SurveyState::Open,
            (true, true) => SurveyState::ResultsVisible,
            (false, true) => SurveyState::Closed,
            (false, false) => SurveyState::ClosedBelowThreshold,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates an answer set and counts it.
    ///
    /// The answer set must cover every required question once, may answer
    /// optional questions, and must not mention unknown questions. A blank
    /// value for an optional question counts as not answered.
    ///
    /// # Errors
    ///
    /// - `SurveyClosed` if the survey no longer accepts responses
    /// - `ValidationFailed` for a missing, duplicate, unknown, or invalid answer
    pub fn accept_response(&mut self, answers: Vec<AnswerInput>) -> Result<AcceptedResponse, DomainError> {
        let current = self.state();
        if !current.accepts_responses() {
            return Err(DomainError::new(
                ErrorCode::SurveyClosed,
                "Survey is no longer accepting responses",
            )
            .with_detail("survey_id", self.id.to_string()));
        }

        let accepted = self.validate_answers(answers)?;

        let count = self.response_count + 1;
        let next = if count >= self.min_responses {
            SurveyState::ResultsVisible
        } else {
            SurveyState::Open
        };
        let results_unlocked = next != current;
        if results_unlocked {
            current
                .transition_to(next)
                .map_err(|e| DomainError::new(ErrorCode::InvalidStateTransition, e.to_string()))?;
        }

        let response = Response::new(self.id, accepted);
        self.response_count = count;
        if results_unlocked {
            self.results_unlocked_at = Some(*response.submitted_at());
        }

        Ok(AcceptedResponse {
            response,
            results_unlocked,
        })
    }

    /// Attaches the summary. Write-once.
    ///
    /// # Errors
    ///
    /// - `ResultsLocked` if the threshold has not been reached
    /// - `SummaryAlreadyAttached` if a summary exists
    /// - `ValidationFailed` for an invalid draft
    pub fn attach_summary(&mut self, draft: SummaryDraft) -> Result<&SurveySummary, DomainError> {
        self.ensure_results_visible()?;

        if self.summary.is_some() {
            return Err(DomainError::new(
                ErrorCode::SummaryAlreadyAttached,
                "A summary is already attached to this survey",
            )
            .with_detail("survey_id", self.id.to_string()));
        }

        let summary = SurveySummary::from_draft(self.id, draft)?;
        Ok(self.summary.insert(summary))
    }

    /// Stops accepting responses. Returns false if the survey was already closed.
    ///
    /// Closing follows the one exit from the current state that no longer
    /// accepts responses, so a survey closed below its threshold stays locked.
    pub fn close(&mut self) -> bool {
        let closing = self
            .state()
            .valid_transitions()
            .into_iter()
            .any(|next| !next.accepts_responses());
        if !closing {
            return false;
        }
        self.is_active = false;
        self.closed_at = Some(Timestamp::now());
        true
    }

    /// Fails with `ResultsLocked` while the threshold has not been reached.
    pub fn ensure_results_visible(&self) -> Result<(), DomainError> {
        if self.can_view_results() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::ResultsLocked,
                format!(
                    "Results unlock after {} responses, {} received",
                    self.min_responses, self.response_count
                ),
            )
            .with_detail("survey_id", self.id.to_string()))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    fn validate_answers(&self, answers: Vec<AnswerInput>) -> Result<Vec<Answer>, DomainError> {
        let known: HashSet<QuestionId> = self.questions.iter().map(Question::id).collect();
        let mut seen = HashSet::new();
        for answer in &answers {
            if !known.contains(&answer.question_id) {
                return Err(DomainError::validation(
                    "answers",
                    format!("Answer refers to unknown question {}", answer.question_id),
                ));
            }
            if !seen.insert(answer.question_id) {
                return Err(DomainError::validation(
                    "answers",
                    format!("Question {} was answered more than once", answer.question_id),
                ));
            }
        }

        let mut accepted = Vec::with_capacity(self.questions.len());
        for question in &self.questions {
            let given = answers
                .iter()
                .find(|a| a.question_id == question.id())
                .filter(|a| question.is_required() || !a.value.trim().is_empty());

            match given {
                Some(answer) => {
                    question.validate_answer(&answer.value)?;
                    accepted.push(Answer::new(question.id(), answer.value.clone()));
                }
                None if question.is_required() => {
                    return Err(DomainError::validation(
                        format!("answers[{}]", question.id()),
                        format!("Question {} requires an answer", question.order() + 1),
                    )
                    .with_detail("question_id", question.id().to_string()));
                }
                None => {}
            }
        }

        Ok(accepted)
    }

    fn validate_title(title: &str) -> Result<String, DomainError> {
        let trimmed = title.trim();
        let length = trimmed.chars().count();
        if length < MIN_TITLE_LENGTH {
            return Err(DomainError::validation(
                "title",
                format!("Title must be at least {} characters", MIN_TITLE_LENGTH),
            ));
        }
        if length > MAX_TITLE_LENGTH {
            return Err(DomainError::validation(
                "title",
                format!("Title cannot exceed {} characters", MAX_TITLE_LENGTH),
            ));
        }
        Ok(trimmed.to_string())
    }

    fn validate_min_responses(min_responses: i64) -> Result<u32, DomainError> {
        if min_responses <= 0 {
            return Err(DomainError::validation(
                "min_responses",
                "Minimum responses must be greater than zero",
            ));
        }
        u32::try_from(min_responses).map_err(|_| {
            DomainError::validation("min_responses", "Minimum responses is too large")
        })
    }
}

impl OwnedByUser for Survey {
    fn owner_id(&self) -> &UserId {
        &self.owner_id
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    fn create(input: NewSurvey) -> Result<Survey, DomainError> {
        Survey::create(
            SurveyId::new(),
            UserId::new("owner-1").unwrap(),
            ShareToken::generate(),
            input,
        )
    }

    #[test]
    fn new_survey_is_open_and_hidden() {
        let survey = survey_with_threshold(3);
        assert!(survey.is_active());
        assert_eq!(survey.response_count(), 0);
        assert!(!survey.can_view_results());
        assert_eq!(survey.state(), SurveyState::Open);
    }

    #[test]
    fn questions_get_sequential_order() {
        let survey = survey_with_threshold(3);
        let orders: Vec<_> = survey.questions().iter().map(Question::order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn title_is_trimmed_and_bounded() {
        let mut input = new_survey(3);
        input.title = "  ab  ".to_string();
        assert_eq!(create(input).unwrap_err().detail("field"), Some("title"));

        let mut input = new_survey(3);
        input.title = "x".repeat(MAX_TITLE_LENGTH + 1);
        assert!(create(input).is_err());

        let mut input = new_survey(3);
        input.title = "  Team pulse  ".to_string();
        assert_eq!(create(input).unwrap().title(), "Team pulse");
    }

    #[test]
    fn question_count_must_be_three_to_ten() {
        let mut input = new_survey(3);
        input.questions.truncate(2);
        assert_eq!(create(input).unwrap_err().detail("field"), Some("questions"));

        let mut input = new_survey(3);
        input.questions = (0..11).map(|i| QuestionDraft::text(format!("Q{}", i))).collect();
        assert!(create(input).is_err());

        let mut input = new_survey(3);
        input.questions = (0..10).map(|i| QuestionDraft::text(format!("Q{}", i))).collect();
        assert!(create(input).is_ok());
    }

    #[test]
    fn threshold_must_be_positive() {
        for bad in [0, -1] {
            let err = create(new_survey(bad)).unwrap_err();
            assert_eq!(err.detail("field"), Some("min_responses"));
        }
    }

    #[test]
    fn single_choice_question_fails_creation() {
        let mut input = new_survey(3);
        input.questions[0] = QuestionDraft::multiple_choice("Pick one", ["Only"]);
        assert_eq!(create(input).unwrap_err().code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn blank_description_becomes_none() {
        let mut input = new_survey(3);
        input.description = Some("   ".to_string());
        assert_eq!(create(input).unwrap().description(), None);
    }

    #[test]
    fn results_unlock_exactly_at_threshold() {
        let mut survey = survey_with_threshold(3);

        for expected in 1..=2 {
            let accepted = survey.accept_response(valid_answers(&survey)).unwrap();
            assert!(!accepted.results_unlocked);
            assert_eq!(survey.response_count(), expected);
            assert!(!survey.can_view_results());
        }

        let accepted = survey.accept_response(valid_answers(&survey)).unwrap();
        assert!(accepted.results_unlocked);
        assert!(survey.can_view_results());
        assert!(survey.results_unlocked_at().is_some());

        let accepted = survey.accept_response(valid_answers(&survey)).unwrap();
        assert!(!accepted.results_unlocked);
        assert!(survey.can_view_results());
    }

    #[test]
    fn missing_required_answer_leaves_count_unchanged() {
        let mut survey = survey_with_threshold(3);
        let mut answers = valid_answers(&survey);
        answers.pop();

        let err = survey.accept_response(answers).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(survey.response_count(), 0);
    }

    #[test]
    fn unknown_and_duplicate_answers_are_rejected() {
        let mut survey = survey_with_threshold(3);

        let mut answers = valid_answers(&survey);
        answers.push(AnswerInput::new(QuestionId::new(), "extra"));
        assert!(survey.accept_response(answers).is_err());

        let mut answers = valid_answers(&survey);
        answers.push(answers[0].clone());
        assert!(survey.accept_response(answers).is_err());

        assert_eq!(survey.response_count(), 0);
    }

    #[test]
    fn optional_question_may_be_skipped() {
        let mut input = new_survey(3);
        input.questions[2] = QuestionDraft::text("Anything else?").optional();
        let mut survey = create(input).unwrap();

        let mut answers = valid_answers(&survey);
        answers[2].value = "  ".to_string();
        let accepted = survey.accept_response(answers).unwrap();
        assert_eq!(accepted.response.answers().len(), 2);
    }

    #[test]
    fn answers_are_stored_in_question_order() {
        let mut survey = survey_with_threshold(3);
        let mut answers = valid_answers(&survey);
        answers.reverse();

        let accepted = survey.accept_response(answers).unwrap();
        let ids: Vec<_> = accepted.response.answers().iter().map(Answer::question_id).collect();
        let expected: Vec<_> = survey.questions().iter().map(Question::id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn closed_survey_rejects_responses() {
        let mut survey = survey_with_threshold(3);
        assert!(survey.close());
        assert!(!survey.close());

        let err = survey.accept_response(valid_answers(&survey)).unwrap_err();
        assert_eq!(err.code, ErrorCode::SurveyClosed);
        assert_eq!(survey.state(), SurveyState::ClosedBelowThreshold);
    }

    #[test]
    fn close_after_threshold_keeps_results() {
        let mut survey = survey_with_threshold(1);
        survey.accept_response(valid_answers(&survey)).unwrap();
        survey.close();
        assert_eq!(survey.state(), SurveyState::Closed);
        assert!(survey.can_view_results());
    }

    #[test]
    fn state_walks_only_forward() {
        let mut survey = survey_with_threshold(2);
        let mut seen = vec![survey.state()];
        for _ in 0..3 {
            survey.accept_response(valid_answers(&survey)).unwrap();
            seen.push(survey.state());
        }
        survey.close();
        seen.push(survey.state());

        for pair in seen.windows(2) {
            assert!(pair[0] == pair[1] || pair[0].can_transition_to(&pair[1]));
        }
        assert_eq!(survey.state(), SurveyState::Closed);
        assert!(survey.state().is_terminal());
    }

    #[test]
    fn question_count_error_names_the_bounds() {
        let mut input = new_survey(3);
        input.questions.truncate(2);
        let err = create(input).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.message.contains("between 3 and 10, got 2"));
    }

    #[test]
    fn summary_requires_threshold_then_is_write_once() {
        let mut survey = survey_with_threshold(1);

        let err = survey.attach_summary(SummaryDraft::test_fixture()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ResultsLocked);

        survey.accept_response(valid_answers(&survey)).unwrap();
        survey.attach_summary(SummaryDraft::test_fixture()).unwrap();
        assert!(survey.summary().is_some());

        let err = survey.attach_summary(SummaryDraft::test_fixture()).unwrap_err();
        assert_eq!(err.code, ErrorCode::SummaryAlreadyAttached);
    }

    #[test]
    fn invalid_summary_is_not_attached() {
        let mut survey = survey_with_threshold(1);
        survey.accept_response(valid_answers(&survey)).unwrap();

        let draft = SummaryDraft {
            sentiment_score: 2.0,
            ..SummaryDraft::test_fixture()
        };
        assert!(survey.attach_summary(draft).is_err());
        assert!(survey.summary().is_none());
    }

    #[test]
    fn ownership_is_checked_against_owner_id() {
        let survey = survey_with_threshold(3);
        assert!(survey.check_ownership(&UserId::new("owner-1").unwrap()).is_ok());
        assert!(survey.check_ownership(&UserId::new("someone").unwrap()).is_err());
    }
}
