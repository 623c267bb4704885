//! SurveyLifecycle - single entry point for survey operations.
//!
//! Owns one instance of each handler, all sharing the same repositories,
//! lock registry and event publisher.

use std::sync::Arc;

use crate::config::LifecycleConfig;
use crate::domain::foundation::{IntakeContext, OwnerContext, SurveyId};
use crate::domain::survey::{
    AnswerInput, NewSurvey, QuestionDraft, Response, Survey, SurveyError, SurveySummary,
    SurveyTemplateType, SummaryDraft, TemplateCatalog,
};
use crate::ports::{
    EventPublisher, ShareTokenGenerator, SurveyRepository, SurveySummarizer, UserRepository,
};

use super::handlers::{
    AttachSummaryCommand, AttachSummaryHandler, CanViewResultsHandler, CanViewResultsQuery,
    CloseSurveyCommand, CloseSurveyHandler, CloseSurveyResult, CreateSurveyCommand,
    CreateSurveyHandler, GenerateSummaryCommand, GenerateSummaryHandler, GetPublicSurveyHandler,
    GetPublicSurveyQuery, GetSurveyHandler, GetSurveyQuery, GetSurveyResultsHandler,
    GetSurveyResultsQuery, ListOwnerSurveysHandler, PublicSurveyView, RecordResponseCommand,
    RecordResponseHandler, RecordResponseResult, SurveyResults,
};
use super::{SurveyLocks, UserLocks};

/// Collaborators the lifecycle is built from.
pub struct LifecyclePorts {
    pub surveys: Arc<dyn SurveyRepository>,
    pub users: Arc<dyn UserRepository>,
    /// Must be the registry every other writer of user records uses.
    pub user_locks: Arc<UserLocks>,
    pub tokens: Arc<dyn ShareTokenGenerator>,
    pub summarizer: Arc<dyn SurveySummarizer>,
    pub event_publisher: Arc<dyn EventPublisher>,
}

pub struct SurveyLifecycle {
    config: LifecycleConfig,
    create: CreateSurveyHandler,
    record: RecordResponseHandler,
    can_view: CanViewResultsHandler,
    attach: Arc<AttachSummaryHandler>,
    close: CloseSurveyHandler,
    generate: GenerateSummaryHandler,
    results: GetSurveyResultsHandler,
    public: GetPublicSurveyHandler,
    list: ListOwnerSurveysHandler,
    get: GetSurveyHandler,
}

impl SurveyLifecycle {
    pub fn new(ports: LifecyclePorts, config: LifecycleConfig) -> Self {
        let locks = Arc::new(SurveyLocks::new());
        let attach = Arc::new(AttachSummaryHandler::new(
            ports.surveys.clone(),
            locks.clone(),
            ports.event_publisher.clone(),
        ));

        Self {
            create: CreateSurveyHandler::new(
                ports.surveys.clone(),
                ports.users,
                ports.user_locks,
                ports.tokens,
                ports.event_publisher.clone(),
                config.share_token_attempts,
            ),
            record: RecordResponseHandler::new(
                ports.surveys.clone(),
                locks.clone(),
                ports.event_publisher.clone(),
            ),
            can_view: CanViewResultsHandler::new(ports.surveys.clone()),
            close: CloseSurveyHandler::new(ports.surveys.clone(), locks, ports.event_publisher),
            generate: GenerateSummaryHandler::new(
                ports.surveys.clone(),
                ports.summarizer,
                attach.clone(),
            ),
            attach,
            results: GetSurveyResultsHandler::new(ports.surveys.clone()),
            public: GetPublicSurveyHandler::new(ports.surveys.clone()),
            list: ListOwnerSurveysHandler::new(ports.surveys.clone()),
            get: GetSurveyHandler::new(ports.surveys),
            config,
        }
    }

    pub async fn create_survey(
        &self,
        ctx: &OwnerContext,
        survey: NewSurvey,
    ) -> Result<Survey, SurveyError> {
        let result = self.create.handle(CreateSurveyCommand { survey }, ctx).await?;
        Ok(result.survey)
    }

    pub async fn record_response(
        &self,
        ctx: &IntakeContext,
        survey_id: SurveyId,
        answers: Vec<AnswerInput>,
    ) -> Result<RecordResponseResult, SurveyError> {
        self.record
            .handle(RecordResponseCommand { survey_id, answers }, ctx)
            .await
    }

    pub async fn can_view_results(&self, survey_id: SurveyId) -> Result<bool, SurveyError> {
        self.can_view.handle(CanViewResultsQuery { survey_id }).await
    }

    pub async fn attach_summary(
        &self,
        ctx: &OwnerContext,
        survey_id: SurveyId,
        summary: SummaryDraft,
    ) -> Result<SurveySummary, SurveyError> {
        let result = self
            .attach
            .handle(AttachSummaryCommand { survey_id, summary }, ctx)
            .await?;
        Ok(result.summary)
    }

    /// Idempotent. Closing an already closed survey succeeds with `closed_now == false`.
    pub async fn close_survey(
        &self,
        ctx: &OwnerContext,
        survey_id: SurveyId,
    ) -> Result<CloseSurveyResult, SurveyError> {
        self.close.handle(CloseSurveyCommand { survey_id }, ctx).await
    }

    pub async fn public_survey(&self, share_token: &str) -> Result<PublicSurveyView, SurveyError> {
        self.public
            .handle(GetPublicSurveyQuery {
                share_token: share_token.to_string(),
            })
            .await
    }

    /// Resolves the token and records the response against that survey.
    pub async fn submit_via_share_token(
        &self,
        ctx: &IntakeContext,
        share_token: &str,
        answers: Vec<AnswerInput>,
    ) -> Result<Response, SurveyError> {
        let view = self.public_survey(share_token).await?;
        let result = self.record_response(ctx, view.survey_id, answers).await?;
        Ok(result.response)
    }

    pub async fn survey_results(
        &self,
        ctx: &OwnerContext,
        survey_id: SurveyId,
    ) -> Result<SurveyResults, SurveyError> {
        self.results
            .handle(GetSurveyResultsQuery { survey_id }, ctx)
            .await
    }

    pub async fn generate_summary(
        &self,
        ctx: &OwnerContext,
        survey_id: SurveyId,
    ) -> Result<SurveySummary, SurveyError> {
        self.generate
            .handle(GenerateSummaryCommand { survey_id }, ctx)
            .await
    }

    pub async fn owner_surveys(&self, ctx: &OwnerContext) -> Result<Vec<Survey>, SurveyError> {
        self.list.handle(ctx).await
    }

    pub async fn survey(&self, ctx: &OwnerContext, survey_id: SurveyId) -> Result<Survey, SurveyError> {
        self.get.handle(GetSurveyQuery { survey_id }, ctx).await
    }

    /// Default questions for a template. Empty for `Custom`.
    pub fn template_questions(&self, template: SurveyTemplateType) -> Vec<QuestionDraft> {
        TemplateCatalog::bundled().questions_for(template)
    }

    /// Input for a survey built from a template's questions and the configured threshold.
    pub fn survey_from_template(
        &self,
        template: SurveyTemplateType,
        title: impl Into<String>,
    ) -> NewSurvey {
        NewSurvey {
            template,
            title: title.into(),
            description: Some(template.description().to_string()),
            min_responses: i64::from(self.config.default_min_responses),
            questions: self.template_questions(template),
        }
    }

    /// Link respondents open to reach the survey.
    pub fn share_url(&self, survey: &Survey) -> String {
        survey.share_token().share_url(&self.config.share_base_url)
    }
}
