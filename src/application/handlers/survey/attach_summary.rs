//! AttachSummaryHandler - Command handler for storing a survey summary.

use std::sync::Arc;

use crate::application::handlers::publish_committed;
use crate::application::SurveyLocks;
use crate::domain::foundation::{
    EventId, OwnedByUser, OwnerContext, SerializableDomainEvent, SurveyId, Timestamp,
};
use crate::domain::survey::{SummaryAttached, SummaryDraft, SurveyError, SurveySummary};
use crate::ports::{EventPublisher, SurveyRepository};

/// Command to attach a summary to a survey whose results are visible.
#[derive(Debug, Clone)]
pub struct AttachSummaryCommand {
    pub survey_id: SurveyId,
    pub summary: SummaryDraft,
}

#[derive(Debug, Clone)]
pub struct AttachSummaryResult {
    pub summary: SurveySummary,
}

pub struct AttachSummaryHandler {
    surveys: Arc<dyn SurveyRepository>,
    locks: Arc<SurveyLocks>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl AttachSummaryHandler {
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
        cmd: AttachSummaryCommand,
        ctx: &OwnerContext,
    ) -> Result<AttachSummaryResult, SurveyError> {
        let summary = {
            let _guard = self.locks.acquire(cmd.survey_id).await;

            let mut survey = self
                .surveys
                .find_by_id(&cmd.survey_id)
                .await?
                .ok_or_else(|| SurveyError::survey_not_found(cmd.survey_id))?;
            survey.check_ownership(ctx.user_id())?;

            let summary = survey.attach_summary(cmd.summary)?.clone();
            self.surveys.update(&survey).await?;
            summary
        };

        tracing::info!(
            survey_id = %cmd.survey_id,
            model = %summary.model(),
            "Summary attached"
        );

        let envelope = SummaryAttached {
            event_id: EventId::new(),
            survey_id: cmd.survey_id,
            owner_id: ctx.user_id().clone(),
            model: summary.model().to_string(),
            overall_sentiment: summary.overall_sentiment(),
            attached_at: Timestamp::now(),
        }
        .to_envelope()
        .with_correlation_id(ctx.correlation_id())
        .with_user_id(ctx.user_id().to_string());
        publish_committed(self.event_publisher.as_ref(), vec![envelope]).await;

        Ok(AttachSummaryResult { summary })
    }
}
