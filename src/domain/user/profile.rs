//! User profile aggregate.
//!
//! Users are created on sign-in (or lazily on first survey creation) and are
//! never deleted. They reference their surveys by id only.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Identity, SurveyId, Timestamp, UserId};

use super::gamification::{level_for_points, BadgeKind, Reward, ON_FIRE_STREAK_DAYS};

/// A badge with the moment it was earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub kind: BadgeKind,
    pub earned_at: Timestamp,
}

/// Survey owner profile with gamification counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: String,
    display_name: String,
    created_at: Timestamp,
    survey_ids: Vec<SurveyId>,
    points: u32,
    level: u32,
    streak_days: u32,
    last_active_on: Option<NaiveDate>,
    badges: Vec<Badge>,
}

impl User {
    /// Creates a profile from a verified identity.
    pub fn from_identity(identity: &Identity) -> Self {
        Self {
            id: identity.user_id.clone(),
            email: identity.email.clone(),
            display_name: identity.display_name_or_default().to_string(),
            created_at: Timestamp::now(),
            survey_ids: Vec::new(),
            points: 0,
            level: 1,
            streak_days: 0,
            last_active_on: None,
            badges: Vec::new(),
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn survey_ids(&self) -> &[SurveyId] {
        &self.survey_ids
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn streak_days(&self) -> u32 {
        self.streak_days
    }

    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    pub fn has_badge(&self, kind: BadgeKind) -> bool {
        self.badges.iter().any(|b| b.kind == kind)
    }

    /// Links a survey to this user. Returns false if it was already linked.
    pub fn register_survey(&mut self, survey_id: SurveyId) -> bool {
        if self.survey_ids.contains(&survey_id) {
            return false;
        }
        self.survey_ids.push(survey_id);
        true
    }

    /// Adds the reward's points. Returns the new level if it went up.
    pub fn award(&mut self, reward: Reward) -> Option<u32> {
        self.points = self.points.saturating_add(reward.points());
        let level = level_for_points(self.points);
        if level > self.level {
            self.level = level;
            Some(level)
        } else {
            None
        }
    }

    /// Updates the daily streak for activity on `day`.
    ///
    /// Same day leaves the streak alone, the next day extends it, and any
    /// other gap restarts it at 1. Returns true if `on_fire` was just earned.
    pub fn record_activity(&mut self, day: NaiveDate) -> bool {
        self.streak_days = match self.last_active_on {
            Some(last) if last == day => self.streak_days,
            Some(last) if last.succ_opt() == Some(day) => self.streak_days + 1,
            _ => 1,
        };
        self.last_active_on = Some(day);

        self.streak_days >= ON_FIRE_STREAK_DAYS && self.earn_badge(BadgeKind::OnFire)
    }

    /// Earns a badge. Returns false if it was already held.
    pub fn earn_badge(&mut self, kind: BadgeKind) -> bool {
        if self.has_badge(kind) {
            return false;
        }
        self.badges.push(Badge {
            kind,
            earned_at: Timestamp::now(),
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::from_identity(&Identity::test_fixture())
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn new_user_starts_at_level_one() {
        let user = user();
        assert_eq!(user.points(), 0);
        assert_eq!(user.level(), 1);
        assert_eq!(user.display_name(), "Owner");
        assert!(user.badges().is_empty());
    }

    #[test]
    fn register_survey_ignores_duplicates() {
        let mut user = user();
        let id = SurveyId::new();
        assert!(user.register_survey(id));
        assert!(!user.register_survey(id));
        assert_eq!(user.survey_ids(), &[id]);
    }

    #[test]
    fn award_reports_level_up() {
        let mut user = user();
        for _ in 0..4 {
            assert_eq!(user.award(Reward::ResultsUnlocked), None);
        }
        assert_eq!(user.award(Reward::ResultsUnlocked), Some(2));
        assert_eq!(user.points(), 500);
    }

    #[test]
    fn streak_extends_on_consecutive_days() {
        let mut user = user();
        user.record_activity(day(1));
        user.record_activity(day(1));
        user.record_activity(day(2));
        assert_eq!(user.streak_days(), 2);

        user.record_activity(day(5));
        assert_eq!(user.streak_days(), 1);
    }

    #[test]
    fn seven_day_streak_earns_on_fire_once() {
        let mut user = user();
        let earned: Vec<bool> = (1..=8).map(|d| user.record_activity(day(d))).collect();
        assert_eq!(earned, vec![false, false, false, false, false, false, true, false]);
        assert!(user.has_badge(BadgeKind::OnFire));
    }

    #[test]
    fn badges_are_earned_once() {
        let mut user = user();
        assert!(user.earn_badge(BadgeKind::Popular));
        assert!(!user.earn_badge(BadgeKind::Popular));
        assert_eq!(user.badges().len(), 1);
    }
}
