//! CloseSurveyHandler - Command handler for closing surveys.

use std::sync::Arc;

use crate::application::handlers::publish_committed;
use crate::application::SurveyLocks;
use crate::domain::foundation::{
    EventId, OwnedByUser, OwnerContext, SerializableDomainEvent, SurveyId, Timestamp,
};
use crate::domain::survey::{SurveyClosed, SurveyError, SurveyState};
use crate::ports::{EventPublisher, SurveyRepository};

#[derive(Debug, Clone)]
pub struct CloseSurveyCommand {
    pub survey_id: SurveyId,
}

#[derive(Debug, Clone)]
pub struct CloseSurveyResult {
    /// False when the survey was already closed.
    pub closed_now: bool,
    pub state: SurveyState,
}

pub struct CloseSurveyHandler {
    surveys: Arc<dyn SurveyRepository>,
    locks: Arc<SurveyLocks>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CloseSurveyHandler {
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
        cmd: CloseSurveyCommand,
        ctx: &OwnerContext,
    ) -> Result<CloseSurveyResult, SurveyError> {
        let survey = {
            let _guard = self.locks.acquire(cmd.survey_id).await;

            let mut survey = self
                .surveys
                .find_by_id(&cmd.survey_id)
                .await?
                .ok_or_else(|| SurveyError::survey_not_found(cmd.survey_id))?;
            survey.check_ownership(ctx.user_id())?;

            if !survey.close() {
                return Ok(CloseSurveyResult {
                    closed_now: false,
                    state: survey.state(),
                });
            }
            self.surveys.update(&survey).await?;
            survey
        };

        tracing::info!(
            survey_id = %survey.id(),
            response_count = survey.response_count(),
            state = ?survey.state(),
            "Survey closed"
        );

        let envelope = SurveyClosed {
            event_id: EventId::new(),
            survey_id: survey.id(),
            owner_id: ctx.user_id().clone(),
            response_count: survey.response_count(),
            results_visible: survey.can_view_results(),
            closed_at: survey.closed_at().copied().unwrap_or_else(Timestamp::now),
        }
        .to_envelope()
        .with_correlation_id(ctx.correlation_id())
        .with_user_id(ctx.user_id().to_string());
        publish_committed(self.event_publisher.as_ref(), vec![envelope]).await;

        Ok(CloseSurveyResult {
            closed_now: true,
            state: survey.state(),
        })
    }
}
