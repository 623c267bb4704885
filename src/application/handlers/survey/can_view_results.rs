//! CanViewResultsHandler - Query handler for the results gate.

use std::sync::Arc;

use crate::domain::foundation::SurveyId;
use crate::domain::survey::SurveyError;
use crate::ports::SurveyRepository;

#[derive(Debug, Clone)]
pub struct CanViewResultsQuery {
    pub survey_id: SurveyId,
}

pub struct CanViewResultsHandler {
    surveys: Arc<dyn SurveyRepository>,
}

impl CanViewResultsHandler {
    pub fn new(surveys: Arc<dyn SurveyRepository>) -> Self {
        Self { surveys }
    }

    /// True once the survey has at least `min_responses` responses.
    pub async fn handle(&self, query: CanViewResultsQuery) -> Result<bool, SurveyError> {
        let survey = self
            .surveys
            .find_by_id(&query.survey_id)
            .await?
            .ok_or_else(|| SurveyError::survey_not_found(query.survey_id))?;
        Ok(survey.can_view_results())
    }
}
