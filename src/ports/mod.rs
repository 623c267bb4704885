//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `SurveyRepository` - Surveys and their anonymous responses
//! - `UserRepository` - Owner profiles
//!
//! ## Collaborator Ports
//!
//! - `CredentialVerifier` - Email/password sign-in
//! - `SurveySummarizer` - External summary generation
//! - `ShareTokenGenerator` - Random share tokens
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events
//! - `EventSubscriber` - Port for subscribing to domain events
//! - `EventHandler` - Handler that processes incoming events

mod credential_verifier;
mod event_publisher;
mod event_subscriber;
mod share_token_generator;
mod survey_repository;
mod survey_summarizer;
mod user_repository;

pub use credential_verifier::CredentialVerifier;
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use share_token_generator::ShareTokenGenerator;
pub use survey_repository::SurveyRepository;
pub use survey_summarizer::{SummarizerError, SummaryRequest, SurveySummarizer};
pub use user_repository::UserRepository;
