//! Scripted summarizer for tests and local runs.
//!
//! Returns queued results in order, then a neutral default summary. Every
//! request is recorded so tests can check what the summarizer was shown.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::survey::{Sentiment, SummaryDraft};
use crate::ports::{SummarizerError, SummaryRequest, SurveySummarizer};

/// Model name reported by the default summary.
pub const MOCK_MODEL: &str = "mock-summarizer-1";

#[derive(Debug, Clone, Default)]
pub struct MockSummarizer {
    results: Arc<Mutex<VecDeque<Result<SummaryDraft, SummarizerError>>>>,
    calls: Arc<Mutex<Vec<SummaryRequest>>>,
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful summary.
    pub fn with_summary(self, draft: SummaryDraft) -> Self {
        locked(&self.results).push_back(Ok(draft));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: SummarizerError) -> Self {
        locked(&self.results).push_back(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        locked(&self.calls).len()
    }

    pub fn calls(&self) -> Vec<SummaryRequest> {
        locked(&self.calls).clone()
    }

    fn default_summary(request: &SummaryRequest) -> SummaryDraft {
        SummaryDraft {
            model: MOCK_MODEL.to_string(),
            strengths: Vec::new(),
            opportunities: Vec::new(),
            overall_sentiment: Sentiment::Neutral,
            sentiment_score: 0.0,
            key_themes: Vec::new(),
            actionable_insights: Vec::new(),
            raw_summary: format!(
                "{} responses to \"{}\".",
                request.responses.len(),
                request.title
            ),
        }
    }
}

#[async_trait]
impl SurveySummarizer for MockSummarizer {
    async fn summarize(&self, request: SummaryRequest) -> Result<SummaryDraft, SummarizerError> {
        let next = locked(&self.results).pop_front();
        let result = next.unwrap_or_else(|| Ok(Self::default_summary(&request)));
        locked(&self.calls).push(request);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SurveyId;
    use crate::domain::survey::SurveyTemplateType;

    fn request() -> SummaryRequest {
        SummaryRequest {
            survey_id: SurveyId::new(),
            template: SurveyTemplateType::Team,
            title: "Team pulse".to_string(),
            questions: Vec::new(),
            responses: Vec::new(),
        }
    }

    #[tokio::test]
    async fn queued_results_come_back_in_order() {
        let summarizer = MockSummarizer::new()
            .with_error(SummarizerError::Unavailable("down".to_string()))
            .with_summary(SummaryDraft::test_fixture());

        assert!(summarizer.summarize(request()).await.is_err());
        let draft = summarizer.summarize(request()).await.unwrap();
        assert_eq!(draft.model, "test-model");
        assert_eq!(summarizer.call_count(), 2);
    }

    #[tokio::test]
    async fn default_summary_is_neutral() {
        let summarizer = MockSummarizer::new();
        let draft = summarizer.summarize(request()).await.unwrap();
        assert_eq!(draft.model, MOCK_MODEL);
        assert_eq!(draft.overall_sentiment, Sentiment::Neutral);
        assert!(draft.raw_summary.contains("Team pulse"));
    }
}
