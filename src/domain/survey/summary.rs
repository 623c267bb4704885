//! AI-generated survey summaries.
//!
//! A summary is produced outside this crate and consumed as data. It is
//! attached to a survey at most once.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, SummaryId, SurveyId, Timestamp};

/// Overall tone of the collected feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    VeryNegative,
}

/// Urgency of an actionable insight. Orders high first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionableInsight {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: String,
}

/// Summary content as delivered by the summarization collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryDraft {
    pub model: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    pub overall_sentiment: Sentiment,
    pub sentiment_score: f64,
    #[serde(default)]
    pub key_themes: Vec<String>,
    #[serde(default)]
    pub actionable_insights: Vec<ActionableInsight>,
    pub raw_summary: String,
}

/// A validated summary bound to one survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveySummary {
    id: SummaryId,
    survey_id: SurveyId,
    model: String,
    created_at: Timestamp,
    strengths: Vec<String>,
    opportunities: Vec<String>,
    overall_sentiment: Sentiment,
    sentiment_score: f64,
    key_themes: Vec<String>,
    actionable_insights: Vec<ActionableInsight>,
    raw_summary: String,
}

impl SurveySummary {
    /// Validates a draft for the given survey.
    ///
    /// Insights are stored sorted by priority, high first, keeping the
    /// delivered order within each priority.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the sentiment score is not a finite value in [-1, 1]
    pub fn from_draft(survey_id: SurveyId, draft: SummaryDraft) -> Result<Self, DomainError> {
        if !draft.sentiment_score.is_finite() || !(-1.0..=1.0).contains(&draft.sentiment_score) {
            return Err(DomainError::validation(
                "sentiment_score",
                format!(
                    "Sentiment score must be between -1.0 and 1.0, got {}",
                    draft.sentiment_score
                ),
            ));
        }

        let mut insights = draft.actionable_insights;
        insights.sort_by_key(|i| i.priority);

        Ok(Self {
            id: SummaryId::new(),
            survey_id,
            model: draft.model,
            created_at: Timestamp::now(),
            strengths: draft.strengths,
            opportunities: draft.opportunities,
            overall_sentiment: draft.overall_sentiment,
            sentiment_score: draft.sentiment_score,
            key_themes: draft.key_themes,
            actionable_insights: insights,
            raw_summary: draft.raw_summary,
        })
    }

    pub fn id(&self) -> SummaryId {
        self.id
    }

    pub fn survey_id(&self) -> SurveyId {
        self.survey_id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn strengths(&self) -> &[String] {
        &self.strengths
    }

    pub fn opportunities(&self) -> &[String] {
        &self.opportunities
    }

    pub fn overall_sentiment(&self) -> Sentiment {
        self.overall_sentiment
    }

    pub fn sentiment_score(&self) -> f64 {
        self.sentiment_score
    }

    pub fn key_themes(&self) -> &[String] {
        &self.key_themes
    }

    pub fn actionable_insights(&self) -> &[ActionableInsight] {
        &self.actionable_insights
    }

    pub fn raw_summary(&self) -> &str {
        &self.raw_summary
    }
}

#[cfg(test)]
impl SummaryDraft {
    pub fn test_fixture() -> Self {
        Self {
            model: "test-model".to_string(),
            strengths: vec!["Clear communication".to_string()],
            opportunities: vec!["Delegate more".to_string()],
            overall_sentiment: Sentiment::Positive,
            sentiment_score: 0.6,
            key_themes: vec!["communication".to_string()],
            actionable_insights: Vec::new(),
            raw_summary: "Mostly positive feedback.".to_string(),
        }
    }
}
