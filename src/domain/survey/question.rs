//! Survey questions and answer validation.
//!
//! A `QuestionDraft` is the loose input shape (also used by the template
//! catalog). `Question::from_draft` turns it into a typed, validated question
//! whose format carries only the data that makes sense for its type.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, QuestionId};

/// Default lower bound for rating questions when none is given.
pub const DEFAULT_RATING_MIN: i32 = 1;

/// Default upper bound for rating questions when none is given.
pub const DEFAULT_RATING_MAX: i32 = 5;

/// Minimum number of choices a multiple-choice question needs.
pub const MIN_CHOICES: usize = 2;

/// Question kinds supported by surveys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    Text,
    Rating,
    YesNo,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::Text => "text",
            QuestionType::Rating => "rating",
            QuestionType::YesNo => "yes_no",
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn default_required() -> bool {
    true
}

/// Unvalidated question input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    #[serde(rename = "type")]
    pub question_type: QuestionType,

    pub prompt: String,

    #[serde(default = "default_required")]
    pub is_required: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_label: Option<String>,
}

impl QuestionDraft {
    fn bare(question_type: QuestionType, prompt: impl Into<String>) -> Self {
        Self {
            question_type,
            prompt: prompt.into(),
            is_required: true,
            choices: Vec::new(),
            min_value: None,
            max_value: None,
            min_label: None,
            max_label: None,
        }
    }

    pub fn text(prompt: impl Into<String>) -> Self {
        Self::bare(QuestionType::Text, prompt)
    }

    pub fn yes_no(prompt: impl Into<String>) -> Self {
        Self::bare(QuestionType::YesNo, prompt)
    }

    pub fn rating(prompt: impl Into<String>, min: i32, max: i32) -> Self {
        Self {
            min_value: Some(min),
            max_value: Some(max),
            ..Self::bare(QuestionType::Rating, prompt)
        }
    }

    pub fn multiple_choice<I, S>(prompt: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            ..Self::bare(QuestionType::MultipleChoice, prompt)
        }
    }

    pub fn with_labels(mut self, min_label: impl Into<String>, max_label: impl Into<String>) -> Self {
        self.min_label = Some(min_label.into());
        self.max_label = Some(max_label.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.is_required = false;
        self
    }
}

/// Type-specific data of a validated question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionFormat {
    MultipleChoice {
        choices: Vec<String>,
    },
    Text,
    Rating {
        min: i32,
        max: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_label: Option<String>,
    },
    YesNo,
}

/// A validated, immutable survey question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    order: usize,
    prompt: String,
    is_required: bool,
    format: QuestionFormat,
}

impl Question {
    /// Validates a draft and assigns it an id and position.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for a blank prompt, fewer than two non-blank
    ///   choices, or rating bounds where `min >= max`
    pub fn from_draft(id: QuestionId, order: usize, draft: QuestionDraft) -> Result<Self, DomainError> {
        let field = format!("questions[{}]", order);

        let prompt = draft.prompt.trim().to_string();
        if prompt.is_empty() {
            return Err(DomainError::validation(field, "Question prompt cannot be empty"));
        }

        let format = match draft.question_type {
            QuestionType::MultipleChoice => {
                let choices: Vec<String> = draft
                    .choices
                    .iter()
                    .map(|c| c.trim())
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect();
                if choices.len() < MIN_CHOICES {
                    return Err(DomainError::validation(
                        field,
                        format!(
                            "Multiple choice questions need at least {} choices, got {}",
                            MIN_CHOICES,
                            choices.len()
                        ),
                    ));
                }
                QuestionFormat::MultipleChoice { choices }
            }
            QuestionType::Rating => {
                let min = draft.min_value.unwrap_or(DEFAULT_RATING_MIN);
                let max = draft.max_value.unwrap_or(DEFAULT_RATING_MAX);
                if min >= max {
                    return Err(DomainError::validation(
                        field,
                        format!("Rating minimum ({}) must be below maximum ({})", min, max),
                    ));
                }
                QuestionFormat::Rating {
                    min,
                    max,
                    min_label: draft.min_label,
                    max_label: draft.max_label,
                }
            }
            QuestionType::Text => QuestionFormat::Text,
            QuestionType::YesNo => QuestionFormat::YesNo,
        };

        Ok(Self {
            id,
            order,
            prompt,
            is_required: draft.is_required,
            format,
        })
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    /// Returns the 0-based position within the survey.
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn is_required(&self) -> bool {
        self.is_required
    }

    pub fn format(&self) -> &QuestionFormat {
        &self.format
    }

    pub fn question_type(&self) -> QuestionType {
        match self.format {
            QuestionFormat::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionFormat::Text => QuestionType::Text,
            QuestionFormat::Rating { .. } => QuestionType::Rating,
            QuestionFormat::YesNo => QuestionType::YesNo,
        }
    }

    /// Checks an answer value against this question's rule.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` naming the question when the value is not acceptable
    pub fn validate_answer(&self, value: &str) -> Result<(), DomainError> {
        let reject = |message: String| {
            Err(DomainError::validation(format!("answers[{}]", self.id), message)
                .with_detail("question_id", self.id.to_string()))
        };

        match &self.format {
            QuestionFormat::MultipleChoice { choices } => {
                if choices.iter().any(|c| c == value) {
                    Ok(())
                } else {
                    reject("Answer must be one of the offered choices".to_string())
                }
            }
            QuestionFormat::Rating { min, max, .. } => match value.trim().parse::<i32>() {
                Ok(rating) if (*min..=*max).contains(&rating) => Ok(()),
                Ok(rating) => reject(format!(
                    "Rating must be between {} and {}, got {}",
                    min, max, rating
                )),
                Err(_) => reject("Rating must be a whole number".to_string()),
            },
            QuestionFormat::YesNo => {
                if value == "yes" || value == "no" {
                    Ok(())
                } else {
                    reject("Answer must be \"yes\" or \"no\"".to_string())
                }
            }
            QuestionFormat::Text => {
                if value.trim().is_empty() {
                    reject("Text answer cannot be blank".to_string())
                } else {
                    Ok(())
                }
            }
        }
    }
}
