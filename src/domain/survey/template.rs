//! Survey templates and their default question sets.
//!
//! The bundled catalog is embedded in the binary via `include_str!` and
//! parsed once on first use.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::QuestionDraft;

static BUNDLED_CATALOG: Lazy<TemplateCatalog> = Lazy::new(|| {
    TemplateCatalog::from_yaml(include_str!("templates.yaml"))
        .unwrap_or_else(|e| panic!("Failed to parse bundled template catalog: {}", e))
});

/// Kind of feedback a survey collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyTemplateType {
    Individual,
    Team,
    Product,
    Service,
    Custom,
}

impl SurveyTemplateType {
    pub const ALL: [SurveyTemplateType; 5] = [
        SurveyTemplateType::Individual,
        SurveyTemplateType::Team,
        SurveyTemplateType::Product,
        SurveyTemplateType::Service,
        SurveyTemplateType::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SurveyTemplateType::Individual => "individual",
            SurveyTemplateType::Team => "team",
            SurveyTemplateType::Product => "product",
            SurveyTemplateType::Service => "service",
            SurveyTemplateType::Custom => "custom",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SurveyTemplateType::Individual => "Individual Feedback",
            SurveyTemplateType::Team => "Team Feedback",
            SurveyTemplateType::Product => "Product Feedback",
            SurveyTemplateType::Service => "Service Feedback",
            SurveyTemplateType::Custom => "Custom Survey",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SurveyTemplateType::Individual => "Get feedback on your personal performance",
            SurveyTemplateType::Team => "Understand how your team works together",
            SurveyTemplateType::Product => "Learn what users think of your product",
            SurveyTemplateType::Service => "Measure the quality of your service",
            SurveyTemplateType::Custom => "Start from scratch with your own questions",
        }
    }
}

impl fmt::Display for SurveyTemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum TemplateCatalogError {
    #[error("Template catalog is not valid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Default question sets keyed by template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TemplateCatalog {
    templates: HashMap<SurveyTemplateType, Vec<QuestionDraft>>,
}

impl TemplateCatalog {
    /// Parses a catalog from YAML. Templates missing from the document have no defaults.
    pub fn from_yaml(source: &str) -> Result<Self, TemplateCatalogError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Returns the catalog bundled with the crate.
    pub fn bundled() -> &'static TemplateCatalog {
        &BUNDLED_CATALOG
    }

    /// Returns the default questions for a template (empty for unknown or custom).
    pub fn questions_for(&self, template: SurveyTemplateType) -> Vec<QuestionDraft> {
        self.templates.get(&template).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::QuestionId;
    use crate::domain::survey::{Question, QuestionType};

    #[test]
    fn bundled_catalog_covers_every_preset() {
        let catalog = TemplateCatalog::bundled();
        for template in SurveyTemplateType::ALL {
            let questions = catalog.questions_for(template);
            if template == SurveyTemplateType::Custom {
                assert!(questions.is_empty());
            } else {
                assert_eq!(questions.len(), 3, "{} should have 3 defaults", template);
            }
        }
    }

    #[test]
    fn bundled_questions_are_all_valid() {
        for template in SurveyTemplateType::ALL {
            for (i, draft) in TemplateCatalog::bundled()
                .questions_for(template)
                .into_iter()
                .enumerate()
            {
                Question::from_draft(QuestionId::new(), i, draft).unwrap();
            }
        }
    }

    #[test]
    fn service_template_asks_for_recommendation() {
        let questions = TemplateCatalog::bundled().questions_for(SurveyTemplateType::Service);
        assert_eq!(questions[1].question_type, QuestionType::YesNo);
        assert_eq!(questions[1].prompt, "Would you recommend our service to others?");
    }

    #[test]
    fn product_template_offers_usage_choices() {
        let questions = TemplateCatalog::bundled().questions_for(SurveyTemplateType::Product);
        assert_eq!(questions[1].choices, vec!["Daily", "Weekly", "Monthly", "Rarely"]);
    }

    #[test]
    fn custom_catalog_parses_and_misses_are_empty() {
        let catalog = TemplateCatalog::from_yaml(
            "team:\n  - type: yes_no\n    prompt: Do you feel heard?\n",
        )
        .unwrap();
        assert_eq!(catalog.questions_for(SurveyTemplateType::Team).len(), 1);
        assert!(catalog.questions_for(SurveyTemplateType::Product).is_empty());
    }

    #[test]
    fn malformed_catalog_is_an_error() {
        assert!(TemplateCatalog::from_yaml("team: [ {type: bogus} ]").is_err());
    }

    #[test]
    fn template_type_uses_snake_case() {
        let json = serde_json::to_string(&SurveyTemplateType::Individual).unwrap();
        assert_eq!(json, "\"individual\"");
    }
}
