//! Shared helpers for integration tests.

#![allow(dead_code)]

use secrecy::SecretString;

use echowave::bootstrap::InMemoryApp;
use echowave::config::{AppConfig, AuthConfig, LifecycleConfig, LoggingConfig};
use echowave::domain::foundation::{Identity, OwnerContext, UserId};
use echowave::domain::survey::{
    AnswerInput, NewSurvey, QuestionDraft, QuestionFormat, Survey, SurveyTemplateType,
};

pub fn test_config() -> AppConfig {
    AppConfig {
        lifecycle: LifecycleConfig {
            share_base_url: "https://echowave.test/f/".to_string(),
            ..LifecycleConfig::default()
        },
        logging: LoggingConfig::default(),
        auth: AuthConfig {
            credential_pepper: SecretString::new("integration-pepper-0123".to_string()),
        },
    }
}

pub fn app() -> InMemoryApp {
    InMemoryApp::recording(&test_config())
}

pub fn owner(id: &str) -> OwnerContext {
    OwnerContext::new(Identity::new(
        UserId::new(id).unwrap(),
        format!("{id}@example.com"),
        None,
    ))
}

/// Rating, yes/no and text: one question of each common kind.
pub fn three_question_survey(min_responses: i64) -> NewSurvey {
    NewSurvey {
        template: SurveyTemplateType::Team,
        title: "Team retro".to_string(),
        description: Some("How did the sprint go?".to_string()),
        min_responses,
        questions: vec![
            QuestionDraft::rating("How was the sprint?", 1, 5).with_labels("Rough", "Smooth"),
            QuestionDraft::yes_no("Did we hit the goal?"),
            QuestionDraft::text("What should change?"),
        ],
    }
}

/// A complete valid answer set for any survey.
pub fn answers_for(survey: &Survey) -> Vec<AnswerInput> {
    survey
        .questions()
        .iter()
        .map(|q| {
            let value = match q.format() {
                QuestionFormat::MultipleChoice { choices } => choices[0].clone(),
                QuestionFormat::Rating { min, .. } => min.to_string(),
                QuestionFormat::YesNo => "no".to_string(),
                QuestionFormat::Text => "More pairing".to_string(),
            };
            AnswerInput::new(q.id(), value)
        })
        .collect()
}
