//! In-memory survey repository.
//!
//! Surveys, the share-token index and responses live behind a single lock,
//! so a commit either lands completely or not at all.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, OwnedByUser, SurveyId, UserId};
use crate::domain::survey::{Response, ShareToken, Survey};
use crate::ports::SurveyRepository;

#[derive(Debug, Default)]
struct Store {
    surveys: HashMap<SurveyId, Survey>,
    tokens: HashMap<ShareToken, SurveyId>,
    responses: HashMap<SurveyId, Vec<Response>>,
}

impl Store {
    fn stored(&self, id: &SurveyId) -> Result<&Survey, DomainError> {
        self.surveys.get(id).ok_or_else(|| {
            DomainError::new(ErrorCode::SurveyNotFound, format!("Survey {} not found", id))
        })
    }
}

fn stale_write(id: SurveyId, stored: u32, incoming: u32) -> DomainError {
    DomainError::new(
        ErrorCode::StaleWrite,
        "Survey was modified concurrently, reload and retry",
    )
    .with_detail("survey_id", id.to_string())
    .with_detail("stored_count", stored.to_string())
    .with_detail("incoming_count", incoming.to_string())
}

/// In-memory `SurveyRepository`.
#[derive(Debug, Clone, Default)]
pub struct InMemorySurveyRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemorySurveyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored surveys.
    pub async fn survey_count(&self) -> usize {
        self.store.read().await.surveys.len()
    }

    /// Number of stored responses across all surveys.
    pub async fn response_count(&self) -> usize {
        self.store.read().await.responses.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl SurveyRepository for InMemorySurveyRepository {
    async fn insert(&self, survey: &Survey) -> Result<(), DomainError> {
        let mut store = self.store.write().await;

        if store.tokens.contains_key(survey.share_token()) {
            return Err(DomainError::new(
                ErrorCode::ShareTokenTaken,
                "Share token is already in use",
            ));
        }
        if store.surveys.contains_key(&survey.id()) {
            return Err(DomainError::new(
                ErrorCode::StorageError,
                format!("Survey {} already exists", survey.id()),
            ));
        }

        store.tokens.insert(survey.share_token().clone(), survey.id());
        store.responses.insert(survey.id(), Vec::new());
        store.surveys.insert(survey.id(), survey.clone());
        Ok(())
    }

    async fn update(&self, survey: &Survey) -> Result<(), DomainError> {
        let mut store = self.store.write().await;

        let stored_count = store.stored(&survey.id())?.response_count();
        if stored_count != survey.response_count() {
            tracing::warn!(survey_id = %survey.id(), "Rejected stale survey update");
            return Err(stale_write(survey.id(), stored_count, survey.response_count()));
        }

        store.surveys.insert(survey.id(), survey.clone());
        Ok(())
    }

    async fn commit_response(
        &self,
        survey: &Survey,
        response: &Response,
    ) -> Result<(), DomainError> {
        let mut store = self.store.write().await;

        let stored = store.stored(&survey.id())?;
        if !stored.is_active() {
            return Err(DomainError::new(
                ErrorCode::SurveyClosed,
                "Survey is no longer accepting responses",
            )
            .with_detail("survey_id", survey.id().to_string()));
        }
        let stored_count = stored.response_count();
        if survey.response_count() != stored_count + 1 {
            tracing::warn!(survey_id = %survey.id(), "Rejected stale response commit");
            return Err(stale_write(survey.id(), stored_count, survey.response_count()));
        }

        store.surveys.insert(survey.id(), survey.clone());
        store
            .responses
            .entry(survey.id())
            .or_default()
            .push(response.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SurveyId) -> Result<Option<Survey>, DomainError> {
        Ok(self.store.read().await.surveys.get(id).cloned())
    }

    async fn find_by_share_token(&self, token: &ShareToken) -> Result<Option<Survey>, DomainError> {
        let store = self.store.read().await;
        Ok(store
            .tokens
            .get(token)
            .and_then(|id| store.surveys.get(id))
            .cloned())
    }

    async fn share_token_exists(&self, token: &ShareToken) -> Result<bool, DomainError> {
        Ok(self.store.read().await.tokens.contains_key(token))
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Survey>, DomainError> {
        let store = self.store.read().await;
        let mut surveys: Vec<Survey> = store
            .surveys
            .values()
            .filter(|s| s.is_owner(owner_id))
            .cloned()
            .collect();
        surveys.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(surveys)
    }

    async fn responses_for(&self, id: &SurveyId) -> Result<Vec<Response>, DomainError> {
        Ok(self
            .store
            .read()
            .await
            .responses
            .get(id)
            .cloned()
            .unwrap_or_default())
    }

    async fn delete(&self, id: &SurveyId) -> Result<(), DomainError> {
        let mut store = self.store.write().await;

        let survey = store.stored(id)?;
        if survey.response_count() > 0 {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Surveys with responses cannot be deleted",
            ));
        }
        let token = survey.share_token().clone();

        store.tokens.remove(&token);
        store.responses.remove(id);
        store.surveys.remove(id);
        Ok(())
    }
}
