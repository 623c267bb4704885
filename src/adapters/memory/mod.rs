//! In-memory persistence adapters.
//!
//! - `InMemorySurveyRepository` - Surveys, share-token index and responses
//! - `InMemoryUserRepository` - Owner profiles

mod survey_repository;
mod user_repository;

pub use survey_repository::InMemorySurveyRepository;
pub use user_repository::InMemoryUserRepository;
