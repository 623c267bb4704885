//! Owner handlers.
//!
//! Sign-in and the gamification event handler.

mod gamification_tracker;
mod sign_in;

pub use gamification_tracker::{GamificationTracker, GAMIFICATION_EVENTS};
pub use sign_in::{SignInCommand, SignInHandler, SignInResult};
