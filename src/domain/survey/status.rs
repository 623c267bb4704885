//! Survey lifecycle state.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Derived lifecycle state of a survey.
///
/// ```text
/// Open --threshold reached--> ResultsVisible --close--> Closed
/// Open --close--> ClosedBelowThreshold
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyState {
    /// Accepting responses, results hidden.
    Open,
    /// Accepting responses, threshold reached.
    ResultsVisible,
    Closed,
    /// Closed before enough responses arrived. Results stay hidden.
    ClosedBelowThreshold,
}

impl SurveyState {
    pub fn accepts_responses(&self) -> bool {
        matches!(self, SurveyState::Open | SurveyState::ResultsVisible)
    }

    pub fn results_visible(&self) -> bool {
        matches!(self, SurveyState::ResultsVisible | SurveyState::Closed)
    }
}

impl StateMachine for SurveyState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SurveyState::*;
        matches!(
            (self, target),
            (Open, ResultsVisible) | (Open, ClosedBelowThreshold) | (ResultsVisible, Closed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SurveyState::*;
        match self {
            Open => vec![ResultsVisible, ClosedBelowThreshold],
            ResultsVisible => vec![Closed],
            Closed | ClosedBelowThreshold => vec![],
        }
    }
}
