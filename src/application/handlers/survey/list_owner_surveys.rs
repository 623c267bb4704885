//! Owner-scoped survey queries.

use std::sync::Arc;

use crate::domain::foundation::{OwnedByUser, OwnerContext, SurveyId};
use crate::domain::survey::{Survey, SurveyError};
use crate::ports::SurveyRepository;

/// Lists the caller's surveys, newest first.
pub struct ListOwnerSurveysHandler {
    surveys: Arc<dyn SurveyRepository>,
}

impl ListOwnerSurveysHandler {
    pub fn new(surveys: Arc<dyn SurveyRepository>) -> Self {
        Self { surveys }
    }

    pub async fn handle(&self, ctx: &OwnerContext) -> Result<Vec<Survey>, SurveyError> {
        Ok(self.surveys.find_by_owner(ctx.user_id()).await?)
    }
}

#[derive(Debug, Clone)]
pub struct GetSurveyQuery {
    pub survey_id: SurveyId,
}

/// Loads one of the caller's surveys.
pub struct GetSurveyHandler {
    surveys: Arc<dyn SurveyRepository>,
}

impl GetSurveyHandler {
    pub fn new(surveys: Arc<dyn SurveyRepository>) -> Self {
        Self { surveys }
    }

    pub async fn handle(&self, query: GetSurveyQuery, ctx: &OwnerContext) -> Result<Survey, SurveyError> {
        let survey = self
            .surveys
            .find_by_id(&query.survey_id)
            .await?
            .ok_or_else(|| SurveyError::survey_not_found(query.survey_id))?;
        survey.check_ownership(ctx.user_id())?;
        Ok(survey)
    }
}
