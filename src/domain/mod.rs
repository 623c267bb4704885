//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, contexts, events, errors)
//! - `survey` - Survey aggregate, questions, responses, summaries and events
//! - `user` - Owner profiles, points, levels, streaks and badges

pub mod foundation;
pub mod survey;
pub mod user;
