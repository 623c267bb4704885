//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - Credential verification
//! - `events` - Event bus
//! - `memory` - In-memory repositories
//! - `summarizer` - Summary collaborators
//! - `token` - Share-token generation

pub mod auth;
pub mod events;
pub mod memory;
pub mod summarizer;
pub mod token;

pub use auth::InMemoryCredentialStore;
pub use events::InMemoryEventBus;
pub use memory::{InMemorySurveyRepository, InMemoryUserRepository};
pub use summarizer::MockSummarizer;
pub use token::RandomShareTokenGenerator;
