//! CreateSurveyHandler - Command handler for creating surveys.

use std::sync::Arc;

use crate::application::handlers::publish_committed;
use crate::application::UserLocks;
use crate::domain::foundation::{
    ErrorCode, EventId, OwnerContext, SerializableDomainEvent, SurveyId,
};
use crate::domain::survey::{NewSurvey, Survey, SurveyCreated, SurveyError};
use crate::domain::user::User;
use crate::ports::{EventPublisher, ShareTokenGenerator, SurveyRepository, UserRepository};

/// Command to create a new survey.
#[derive(Debug, Clone)]
pub struct CreateSurveyCommand {
    pub survey: NewSurvey,
}

/// Result of successful survey creation.
#[derive(Debug, Clone)]
pub struct CreateSurveyResult {
    pub survey: Survey,
    pub event: SurveyCreated,
}

/// Handler for creating surveys.
pub struct CreateSurveyHandler {
    surveys: Arc<dyn SurveyRepository>,
    users: Arc<dyn UserRepository>,
    user_locks: Arc<UserLocks>,
    tokens: Arc<dyn ShareTokenGenerator>,
    event_publisher: Arc<dyn EventPublisher>,
    share_token_attempts: u32,
}

impl CreateSurveyHandler {
    pub fn new(
        surveys: Arc<dyn SurveyRepository>,
        users: Arc<dyn UserRepository>,
        user_locks: Arc<UserLocks>,
        tokens: Arc<dyn ShareTokenGenerator>,
        event_publisher: Arc<dyn EventPublisher>,
        share_token_attempts: u32,
    ) -> Self {
        Self {
            surveys,
            users,
            user_locks,
            tokens,
            event_publisher,
            share_token_attempts,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateSurveyCommand,
        ctx: &OwnerContext,
    ) -> Result<CreateSurveyResult, SurveyError> {
        // 1. Build and store the survey under a share token nobody else holds
        let survey = self.insert_with_unique_token(cmd.survey, ctx).await?;

        // 2. Link it to the owner, creating the profile on first use
        if let Err(e) = self.register_on_owner(&survey, ctx).await {
            if let Err(undo) = self.surveys.delete(&survey.id()).await {
                tracing::error!(
                    survey_id = %survey.id(),
                    error = %undo,
                    "Failed to remove survey after owner registration failed"
                );
            }
            return Err(e);
        }

        tracing::info!(
            survey_id = %survey.id(),
            owner_id = %ctx.user_id(),
            min_responses = survey.min_responses(),
            "Survey created"
        );

        // 3. Publish
        let event = SurveyCreated {
            event_id: EventId::new(),
            survey_id: survey.id(),
            owner_id: ctx.user_id().clone(),
            template: survey.template(),
            title: survey.title().to_string(),
            question_count: survey.questions().len(),
            min_responses: survey.min_responses(),
            created_at: *survey.created_at(),
        };
        let envelope = event
            .to_envelope()
            .with_correlation_id(ctx.correlation_id())
            .with_user_id(ctx.user_id().to_string());
        publish_committed(self.event_publisher.as_ref(), vec![envelope]).await;

        Ok(CreateSurveyResult { survey, event })
    }

    async fn insert_with_unique_token(
        &self,
        input: NewSurvey,
        ctx: &OwnerContext,
    ) -> Result<Survey, SurveyError> {
        let survey_id = SurveyId::new();

        for attempt in 1..=self.share_token_attempts {
            let token = self.tokens.generate();
            if self.surveys.share_token_exists(&token).await? {
                tracing::debug!(attempt, "Share token collision, regenerating");
                continue;
            }

            let survey = Survey::create(survey_id, ctx.user_id().clone(), token, input.clone())?;
            match self.surveys.insert(&survey).await {
                Ok(()) => return Ok(survey),
                Err(e) if e.code == ErrorCode::ShareTokenTaken => {
                    tracing::debug!(attempt, "Share token taken during insert, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::warn!(
            attempts = self.share_token_attempts,
            "Could not find an unused share token"
        );
        Err(SurveyError::conflict(format!(
            "no unused share token after {} attempts",
            self.share_token_attempts
        )))
    }

    async fn register_on_owner(&self, survey: &Survey, ctx: &OwnerContext) -> Result<(), SurveyError> {
        let _guard = self.user_locks.acquire(ctx.user_id().clone()).await;
        let mut user = match self.users.find_by_id(ctx.user_id()).await? {
            Some(user) => user,
            None => User::from_identity(ctx.identity()),
        };
        user.register_survey(survey.id());
        self.users.save(&user).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryEventBus, InMemorySurveyRepository, InMemoryUserRepository};
    use crate::domain::foundation::{DomainError, UserId};
    use crate::domain::survey::test_support::new_survey;
    use crate::domain::survey::{QuestionDraft, ShareToken};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns the queued tokens in order, then fresh random ones.
    struct ScriptedTokens(Mutex<Vec<ShareToken>>);

    impl ScriptedTokens {
        fn new(tokens: Vec<ShareToken>) -> Self {
            Self(Mutex::new(tokens))
        }
    }

    impl ShareTokenGenerator for ScriptedTokens {
        fn generate(&self) -> ShareToken {
            let mut tokens = self.0.lock().unwrap();
            if tokens.is_empty() {
                ShareToken::generate()
            } else {
                tokens.remove(0)
            }
        }
    }

    struct FailingUserRepository;

    #[async_trait]
    impl UserRepository for FailingUserRepository {
        async fn save(&self, _user: &User) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::StorageError, "Simulated save failure"))
        }

        async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, DomainError> {
            Ok(None)
        }
    }

    struct Fixture {
        surveys: Arc<InMemorySurveyRepository>,
        users: Arc<InMemoryUserRepository>,
        bus: Arc<InMemoryEventBus>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                surveys: Arc::new(InMemorySurveyRepository::new()),
                users: Arc::new(InMemoryUserRepository::new()),
                bus: Arc::new(InMemoryEventBus::recording()),
            }
        }

        fn handler(&self, tokens: Arc<dyn ShareTokenGenerator>) -> CreateSurveyHandler {
            CreateSurveyHandler::new(
                self.surveys.clone(),
                self.users.clone(),
                Arc::new(UserLocks::new()),
                tokens,
                self.bus.clone(),
                3,
            )
        }
    }

    fn token(c: char) -> ShareToken {
        ShareToken::parse(&c.to_string().repeat(22)).unwrap()
    }

    #[tokio::test]
    async fn creates_survey_and_registers_owner() {
        let fx = Fixture::new();
        let handler = fx.handler(Arc::new(ScriptedTokens::new(vec![])));
        let ctx = OwnerContext::test_fixture();

        let result = handler
            .handle(CreateSurveyCommand { survey: new_survey(3) }, &ctx)
            .await
            .unwrap();

        assert!(!result.survey.can_view_results());
        assert_eq!(fx.surveys.survey_count().await, 1);

        let owner = fx.users.find_by_id(ctx.user_id()).await.unwrap().unwrap();
        assert_eq!(owner.survey_ids(), &[result.survey.id()]);
        assert!(fx.bus.has_event("survey.created.v1"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_register_every_survey_on_owner() {
        let fx = Fixture::new();
        let handler = Arc::new(fx.handler(Arc::new(ScriptedTokens::new(vec![]))));
        let ctx = OwnerContext::test_fixture();

        let tasks: Vec<_> = (0..24)
            .map(|_| {
                let handler = Arc::clone(&handler);
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    handler
                        .handle(CreateSurveyCommand { survey: new_survey(3) }, &ctx)
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let owner = fx.users.find_by_id(ctx.user_id()).await.unwrap().unwrap();
        assert_eq!(owner.survey_ids().len(), 24);
        assert_eq!(fx.surveys.survey_count().await, 24);
    }

    #[tokio::test]
    async fn event_carries_owner_and_correlation() {
        let fx = Fixture::new();
        let handler = fx.handler(Arc::new(ScriptedTokens::new(vec![])));

        handler
            .handle(CreateSurveyCommand { survey: new_survey(3) }, &OwnerContext::test_fixture())
            .await
            .unwrap();

        let event = &fx.bus.events_of_type("survey.created.v1")[0];
        assert_eq!(event.metadata.user_id.as_deref(), Some("owner-1"));
        assert_eq!(event.metadata.correlation_id.as_deref(), Some("test-correlation-id"));
    }

    #[tokio::test]
    async fn colliding_token_is_regenerated() {
        let fx = Fixture::new();
        let ctx = OwnerContext::test_fixture();

        let first = fx
            .handler(Arc::new(ScriptedTokens::new(vec![token('a')])))
            .handle(CreateSurveyCommand { survey: new_survey(3) }, &ctx)
            .await
            .unwrap();

        let second = fx
            .handler(Arc::new(ScriptedTokens::new(vec![token('a'), token('b')])))
            .handle(CreateSurveyCommand { survey: new_survey(3) }, &ctx)
            .await
            .unwrap();

        assert_eq!(first.survey.share_token(), &token('a'));
        assert_eq!(second.survey.share_token(), &token('b'));
    }

    #[tokio::test]
    async fn exhausted_token_attempts_is_a_conflict() {
        let fx = Fixture::new();
        let ctx = OwnerContext::test_fixture();
        fx.handler(Arc::new(ScriptedTokens::new(vec![token('a')])))
            .handle(CreateSurveyCommand { survey: new_survey(3) }, &ctx)
            .await
            .unwrap();

        let err = fx
            .handler(Arc::new(ScriptedTokens::new(vec![token('a'); 3])))
            .handle(CreateSurveyCommand { survey: new_survey(3) }, &ctx)
            .await
            .unwrap_err();

        assert!(matches!(err, SurveyError::Conflict(_)));
        assert_eq!(fx.surveys.survey_count().await, 1);
    }

    #[tokio::test]
    async fn invalid_survey_stores_nothing() {
        let fx = Fixture::new();
        let handler = fx.handler(Arc::new(ScriptedTokens::new(vec![])));
        let mut input = new_survey(3);
        input.questions[0] = QuestionDraft::multiple_choice("Pick one", ["Only"]);

        let err = handler
            .handle(CreateSurveyCommand { survey: input }, &OwnerContext::test_fixture())
            .await
            .unwrap_err();

        assert!(matches!(err, SurveyError::Validation { .. }));
        assert_eq!(fx.surveys.survey_count().await, 0);
        assert_eq!(fx.users.user_count().await, 0);
        assert_eq!(fx.bus.event_count(), 0);
    }

    #[tokio::test]
    async fn owner_registration_failure_removes_survey() {
        let fx = Fixture::new();
        let handler = CreateSurveyHandler::new(
            fx.surveys.clone(),
            Arc::new(FailingUserRepository),
            Arc::new(UserLocks::new()),
            Arc::new(ScriptedTokens::new(vec![])),
            fx.bus.clone(),
            3,
        );

        let err = handler
            .handle(CreateSurveyCommand { survey: new_survey(3) }, &OwnerContext::test_fixture())
            .await
            .unwrap_err();

        assert!(matches!(err, SurveyError::Infrastructure(_)));
        assert_eq!(fx.surveys.survey_count().await, 0);
        assert_eq!(fx.bus.event_count(), 0);
    }
}
