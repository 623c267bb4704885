//! GenerateSummaryHandler - Asks the summarizer for a summary and attaches it.
//!
//! All gate checks run before the summarizer is called, so a locked or
//! already summarized survey never costs a summarizer request. The attach
//! itself goes through [`AttachSummaryHandler`], which checks again under
//! the survey lock.

use std::sync::Arc;

use crate::domain::foundation::{OwnedByUser, OwnerContext, SurveyId};
use crate::domain::survey::{SurveyError, SurveySummary};
use crate::ports::{SummarizerError, SummaryRequest, SurveyRepository, SurveySummarizer};

use super::{AttachSummaryCommand, AttachSummaryHandler};

#[derive(Debug, Clone)]
pub struct GenerateSummaryCommand {
    pub survey_id: SurveyId,
}

pub struct GenerateSummaryHandler {
    surveys: Arc<dyn SurveyRepository>,
    summarizer: Arc<dyn SurveySummarizer>,
    attach: Arc<AttachSummaryHandler>,
}

impl GenerateSummaryHandler {
    pub fn new(
        surveys: Arc<dyn SurveyRepository>,
        summarizer: Arc<dyn SurveySummarizer>,
        attach: Arc<AttachSummaryHandler>,
    ) -> Self {
        Self {
            surveys,
            summarizer,
            attach,
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateSummaryCommand,
        ctx: &OwnerContext,
    ) -> Result<SurveySummary, SurveyError> {
        let survey = self
            .surveys
            .find_by_id(&cmd.survey_id)
            .await?
            .ok_or_else(|| SurveyError::survey_not_found(cmd.survey_id))?;
        survey.check_ownership(ctx.user_id())?;
        survey.ensure_results_visible()?;
        if survey.summary().is_some() {
            return Err(SurveyError::conflict(
                "A summary is already attached to this survey",
            ));
        }

        let responses = self.surveys.responses_for(&cmd.survey_id).await?;
        let request = SummaryRequest {
            survey_id: survey.id(),
            template: survey.template(),
            title: survey.title().to_string(),
            questions: survey.questions().to_vec(),
            responses,
        };

        let draft = self.summarizer.summarize(request).await.map_err(|e| {
            tracing::warn!(survey_id = %cmd.survey_id, error = %e, "Summarizer failed");
            summarizer_error(e)
        })?;

        let result = self
            .attach
            .handle(
                AttachSummaryCommand {
                    survey_id: cmd.survey_id,
                    summary: draft,
                },
                ctx,
            )
            .await?;
        Ok(result.summary)
    }
}

fn summarizer_error(err: SummarizerError) -> SurveyError {
    match err {
        SummarizerError::InvalidOutput(msg) => {
            SurveyError::infrastructure(format!("summarizer returned unusable output: {msg}"))
        }
        other => SurveyError::infrastructure(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockSummarizer;
    use crate::application::handlers::survey::test_fixtures::{other_owner, Fixture};
    use crate::domain::survey::{Sentiment, SummaryDraft};

    fn generate(fx: &Fixture, summarizer: Arc<MockSummarizer>) -> GenerateSummaryHandler {
        let attach = Arc::new(AttachSummaryHandler::new(
            fx.surveys.clone(),
            fx.locks.clone(),
            fx.bus.clone(),
        ));
        GenerateSummaryHandler::new(fx.surveys.clone(), summarizer, attach)
    }

    #[tokio::test]
    async fn summarizer_sees_every_response() {
        let fx = Fixture::new();
        let survey = fx.survey_with_responses(2, 3).await;
        let summarizer = Arc::new(MockSummarizer::new().with_summary(SummaryDraft::test_fixture()));

        let summary = generate(&fx, summarizer.clone())
            .handle(
                GenerateSummaryCommand {
                    survey_id: survey.id(),
                },
                &OwnerContext::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(summary.overall_sentiment(), Sentiment::Positive);
        let calls = summarizer.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].responses.len(), 3);
        assert_eq!(calls[0].questions.len(), 3);
    }

    #[tokio::test]
    async fn locked_results_skip_summarizer() {
        let fx = Fixture::new();
        let survey = fx.survey_with_responses(3, 1).await;
        let summarizer = Arc::new(MockSummarizer::new());

        let err = generate(&fx, summarizer.clone())
            .handle(
                GenerateSummaryCommand {
                    survey_id: survey.id(),
                },
                &OwnerContext::test_fixture(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, SurveyError::Precondition(_)));
        assert_eq!(summarizer.call_count(), 0);
    }

    #[tokio::test]
    async fn existing_summary_skips_summarizer() {
        let fx = Fixture::new();
        let survey = fx.survey_with_responses(1, 1).await;
        let summarizer = Arc::new(MockSummarizer::new());
        let handler = generate(&fx, summarizer.clone());
        let cmd = GenerateSummaryCommand {
            survey_id: survey.id(),
        };

        handler.handle(cmd.clone(), &OwnerContext::test_fixture()).await.unwrap();
        let err = handler
            .handle(cmd, &OwnerContext::test_fixture())
            .await
            .unwrap_err();

        assert!(matches!(err, SurveyError::Conflict(_)));
        assert_eq!(summarizer.call_count(), 1);
    }

    #[tokio::test]
    async fn non_owner_skips_summarizer() {
        let fx = Fixture::new();
        let survey = fx.survey_with_responses(1, 1).await;
        let summarizer = Arc::new(MockSummarizer::new());

        let err = generate(&fx, summarizer.clone())
            .handle(
                GenerateSummaryCommand {
                    survey_id: survey.id(),
                },
                &other_owner(),
            )
            .await
            .unwrap_err();

        assert_eq!(err, SurveyError::Forbidden);
        assert_eq!(summarizer.call_count(), 0);
    }

    #[tokio::test]
    async fn summarizer_failure_is_retryable() {
        let fx = Fixture::new();
        let survey = fx.survey_with_responses(1, 1).await;
        let summarizer = Arc::new(
            MockSummarizer::new().with_error(SummarizerError::RateLimited { retry_after_secs: 5 }),
        );

        let err = generate(&fx, summarizer)
            .handle(
                GenerateSummaryCommand {
                    survey_id: survey.id(),
                },
                &OwnerContext::test_fixture(),
            )
            .await
            .unwrap_err();

        assert!(err.is_retryable());
        let stored = fx.surveys.find_by_id(&survey.id()).await.unwrap().unwrap();
        assert!(stored.summary().is_none());
    }
}
