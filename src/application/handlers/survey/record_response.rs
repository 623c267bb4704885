//! RecordResponseHandler - Command handler for anonymous response intake.
//!
//! The load-validate-commit sequence runs under the survey's lock so the
//! counter advances by exactly one per accepted response, and only the
//! response that crosses the threshold reports the unlock.

use std::sync::Arc;

use crate::application::handlers::publish_committed;
use crate::application::SurveyLocks;
use crate::domain::foundation::{
    EventId, IntakeContext, OwnedByUser, SerializableDomainEvent, SurveyId,
};
use crate::domain::survey::{AnswerInput, Response, ResponseRecorded, ResultsUnlocked, SurveyError};
use crate::ports::{EventPublisher, SurveyRepository};

/// Command to record one anonymous response.
#[derive(Debug, Clone)]
pub struct RecordResponseCommand {
    pub survey_id: SurveyId,
    pub answers: Vec<AnswerInput>,
}

/// Result of a recorded response.
#[derive(Debug, Clone)]
pub struct RecordResponseResult {
    pub response: Response,
    pub response_count: u32,
    /// True only for the response that reached the threshold.
    pub results_unlocked: bool,
}

pub struct RecordResponseHandler {
    surveys: Arc<dyn SurveyRepository>,
    locks: Arc<SurveyLocks>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RecordResponseHandler {
    pub fn new(
        surveys: Arc<dyn SurveyRepository>,
        locks: Arc<SurveyLocks>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            surveys,
            locks,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: RecordResponseCommand,
        ctx: &IntakeContext,
    ) -> Result<RecordResponseResult, SurveyError> {
        let (survey, accepted) = {
            let _guard = self.locks.acquire(cmd.survey_id).await;

            let mut survey = self
                .surveys
                .find_by_id(&cmd.survey_id)
                .await?
                .ok_or_else(|| SurveyError::survey_not_found(cmd.survey_id))?;

            let accepted = survey.accept_response(cmd.answers)?;
            self.surveys
                .commit_response(&survey, &accepted.response)
                .await?;
            (survey, accepted)
        };

        tracing::debug!(
            survey_id = %survey.id(),
            response_count = survey.response_count(),
            channel = ctx.channel().unwrap_or("direct"),
            "Response recorded"
        );

        let correlation_id = ctx.correlation_id();
        let recorded_at = *accepted.response.submitted_at();
        let recorded = ResponseRecorded {
            event_id: EventId::new(),
            survey_id: survey.id(),
            owner_id: survey.owner_id().clone(),
            response_count: survey.response_count(),
            recorded_at,
        };
        let recorded_id = recorded.event_id.clone();
        let mut envelopes = vec![recorded
            .to_envelope()
            .with_correlation_id(correlation_id.clone())];

        if accepted.results_unlocked {
            tracing::info!(
                survey_id = %survey.id(),
                min_responses = survey.min_responses(),
                "Results unlocked"
            );
            envelopes.push(
                ResultsUnlocked {
                    event_id: EventId::new(),
                    survey_id: survey.id(),
                    owner_id: survey.owner_id().clone(),
                    min_responses: survey.min_responses(),
                    unlocked_at: recorded_at,
                }
                .to_envelope()
                .with_correlation_id(correlation_id)
                .with_causation_id(recorded_id.as_str()),
            );
        }
        publish_committed(self.event_publisher.as_ref(), envelopes).await;

        Ok(RecordResponseResult {
            response: accepted.response,
            response_count: survey.response_count(),
            results_unlocked: accepted.results_unlocked,
        })
    }
}
