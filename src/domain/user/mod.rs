//! User module - survey owner profiles and gamification.
//!
//! Owners earn points for activity on their surveys. Every 500 points is a
//! level, consecutive active days build a streak, and milestones earn badges.

mod gamification;
mod profile;

pub use gamification::{
    level_for_points, BadgeKind, Reward, ON_FIRE_STREAK_DAYS, POINTS_PER_LEVEL,
    POPULAR_RESPONSE_COUNT,
};
pub use profile::{Badge, User};
