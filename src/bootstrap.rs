//! Wiring for a fully in-memory EchoWave instance.

use std::sync::Arc;

use crate::adapters::{
    InMemoryCredentialStore, InMemoryEventBus, InMemorySurveyRepository, InMemoryUserRepository,
    MockSummarizer, RandomShareTokenGenerator,
};
use crate::application::{
    GamificationTracker, LifecyclePorts, SignInHandler, SurveyLifecycle, UserLocks,
};
use crate::config::AppConfig;
use crate::ports::SurveySummarizer;

/// All adapters plus the application services built on them.
pub struct InMemoryApp {
    pub lifecycle: SurveyLifecycle,
    pub sign_in: SignInHandler,
    pub credentials: Arc<InMemoryCredentialStore>,
    pub surveys: Arc<InMemorySurveyRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub events: Arc<InMemoryEventBus>,
    pub gamification: Arc<GamificationTracker>,
}

impl InMemoryApp {
    /// Builds the app with the default scripted summarizer.
    pub fn build(config: &AppConfig) -> Self {
        Self::with_summarizer(config, Arc::new(MockSummarizer::new()))
    }

    /// Like [`InMemoryApp::build`], but the bus keeps every published event.
    pub fn recording(config: &AppConfig) -> Self {
        Self::assemble(
            config,
            Arc::new(MockSummarizer::new()),
            InMemoryEventBus::recording(),
        )
    }

    pub fn with_summarizer(config: &AppConfig, summarizer: Arc<dyn SurveySummarizer>) -> Self {
        Self::assemble(config, summarizer, InMemoryEventBus::new())
    }

    fn assemble(
        config: &AppConfig,
        summarizer: Arc<dyn SurveySummarizer>,
        events: InMemoryEventBus,
    ) -> Self {
        let surveys = Arc::new(InMemorySurveyRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let events = Arc::new(events);
        let credentials = Arc::new(InMemoryCredentialStore::new(
            config.auth.credential_pepper.clone(),
        ));

        let user_locks = Arc::new(UserLocks::new());

        let gamification = Arc::new(GamificationTracker::new(users.clone(), user_locks.clone()));
        gamification.subscribe_to(events.as_ref());

        let lifecycle = SurveyLifecycle::new(
            LifecyclePorts {
                surveys: surveys.clone(),
                users: users.clone(),
                user_locks: user_locks.clone(),
                tokens: Arc::new(RandomShareTokenGenerator::new()),
                summarizer,
                event_publisher: events.clone(),
            },
            config.lifecycle.clone(),
        );
        let sign_in = SignInHandler::new(credentials.clone(), users.clone(), user_locks);

        tracing::debug!(
            share_base_url = %config.lifecycle.share_base_url,
            recording = events.is_recording(),
            "In-memory app assembled"
        );

        Self {
            lifecycle,
            sign_in,
            credentials,
            surveys,
            users,
            events,
            gamification,
        }
    }
}
