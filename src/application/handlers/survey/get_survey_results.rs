//! GetSurveyResultsHandler - Query handler for the owner's results view.
//!
//! Individual responses are only readable once the threshold is reached.

use std::sync::Arc;

use crate::domain::foundation::{OwnedByUser, OwnerContext, SurveyId};
use crate::domain::survey::{Response, Survey, SurveyError, SurveySummary};
use crate::ports::SurveyRepository;

#[derive(Debug, Clone)]
pub struct GetSurveyResultsQuery {
    pub survey_id: SurveyId,
}

/// Unlocked results of a survey.
#[derive(Debug, Clone)]
pub struct SurveyResults {
    pub survey: Survey,
    pub responses: Vec<Response>,
    pub summary: Option<SurveySummary>,
}

pub struct GetSurveyResultsHandler {
    surveys: Arc<dyn SurveyRepository>,
}

impl GetSurveyResultsHandler {
    pub fn new(surveys: Arc<dyn SurveyRepository>) -> Self {
        Self { surveys }
    }

    pub async fn handle(
        &self,
        query: GetSurveyResultsQuery,
        ctx: &OwnerContext,
    ) -> Result<SurveyResults, SurveyError> {
        let survey = self
            .surveys
            .find_by_id(&query.survey_id)
            .await?
            .ok_or_else(|| SurveyError::survey_not_found(query.survey_id))?;
        survey.check_ownership(ctx.user_id())?;
        survey.ensure_results_visible()?;

        let responses = self.surveys.responses_for(&query.survey_id).await?;
        let summary = survey.summary().cloned();

        Ok(SurveyResults {
            survey,
            responses,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::survey::test_fixtures::{other_owner, Fixture};

    #[tokio::test]
    async fn returns_responses_once_unlocked() {
        let fx = Fixture::new();
        let survey = fx.survey_with_responses(2, 2).await;

        let results = GetSurveyResultsHandler::new(fx.surveys.clone())
            .handle(
                GetSurveyResultsQuery {
                    survey_id: survey.id(),
                },
                &OwnerContext::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(results.responses.len(), 2);
        assert!(results.summary.is_none());
        assert!(results
            .responses
            .iter()
            .all(|r| r.survey_id() == survey.id()));
    }

    #[tokio::test]
    async fn locked_results_are_a_precondition_failure() {
        let fx = Fixture::new();
        let survey = fx.survey_with_responses(3, 2).await;

        let err = GetSurveyResultsHandler::new(fx.surveys.clone())
            .handle(
                GetSurveyResultsQuery {
                    survey_id: survey.id(),
                },
                &OwnerContext::test_fixture(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, SurveyError::Precondition(_)));
    }

    #[tokio::test]
    async fn other_owner_is_forbidden() {
        let fx = Fixture::new();
        let survey = fx.survey_with_responses(1, 1).await;

        let err = GetSurveyResultsHandler::new(fx.surveys.clone())
            .handle(
                GetSurveyResultsQuery {
                    survey_id: survey.id(),
                },
                &other_owner(),
            )
            .await
            .unwrap_err();

        assert_eq!(err, SurveyError::Forbidden);
    }
}
