//! Points, levels, streaks and badges earned by survey owners.

use serde::{Deserialize, Serialize};

/// Points needed per level.
pub const POINTS_PER_LEVEL: u32 = 500;

/// Responses on a single survey that earn the `popular` badge.
pub const POPULAR_RESPONSE_COUNT: u32 = 10;

/// Consecutive active days that earn the `on_fire` badge.
pub const ON_FIRE_STREAK_DAYS: u32 = 7;

/// Activities that earn points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reward {
    SurveyCreated,
    ResponseReceived,
    ResultsUnlocked,
    SummaryAttached,
}

impl Reward {
    pub fn points(&self) -> u32 {
        match self {
            Reward::SurveyCreated => 50,
            Reward::ResponseReceived => 5,
            Reward::ResultsUnlocked => 100,
            Reward::SummaryAttached => 25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    /// Created a first survey.
    FirstSurvey,
    /// A survey received ten responses.
    Popular,
    /// Active seven days in a row.
    OnFire,
}

impl BadgeKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            BadgeKind::FirstSurvey => "First Survey",
            BadgeKind::Popular => "Popular",
            BadgeKind::OnFire => "On Fire",
        }
    }
}

/// Level reached with the given points total. Starts at 1.
pub fn level_for_points(points: u32) -> u32 {
    1 + points / POINTS_PER_LEVEL
}
