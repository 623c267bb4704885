//! GetPublicSurveyHandler - Resolves a share token to what a respondent sees.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::SurveyId;
use crate::domain::survey::{Question, ShareToken, Survey, SurveyError, SurveyTemplateType};
use crate::ports::SurveyRepository;

#[derive(Debug, Clone)]
pub struct GetPublicSurveyQuery {
    pub share_token: String,
}

/// Respondent-facing view of a survey.
///
/// Carries no owner identity and no response counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicSurveyView {
    pub survey_id: SurveyId,
    pub title: String,
    pub description: Option<String>,
    pub template: SurveyTemplateType,
    pub questions: Vec<Question>,
    pub is_active: bool,
}

impl From<&Survey> for PublicSurveyView {
    fn from(survey: &Survey) -> Self {
        Self {
            survey_id: survey.id(),
            title: survey.title().to_string(),
            description: survey.description().map(str::to_string),
            template: survey.template(),
            questions: survey.questions().to_vec(),
            is_active: survey.is_active(),
        }
    }
}

pub struct GetPublicSurveyHandler {
    surveys: Arc<dyn SurveyRepository>,
}

impl GetPublicSurveyHandler {
    pub fn new(surveys: Arc<dyn SurveyRepository>) -> Self {
        Self { surveys }
    }

    /// Malformed and unknown tokens are both reported as not found.
    pub async fn handle(&self, query: GetPublicSurveyQuery) -> Result<PublicSurveyView, SurveyError> {
        let token = ShareToken::parse(query.share_token.trim())
            .map_err(|_| SurveyError::not_found("shared survey"))?;

        let survey = self
            .surveys
            .find_by_share_token(&token)
            .await?
            .ok_or_else(|| SurveyError::not_found("shared survey"))?;

        Ok(PublicSurveyView::from(&survey))
    }
}
