//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, contexts, and error types
//! that form the vocabulary of the EchoWave domain.

mod auth;
mod context;
mod errors;
mod events;
mod ids;
mod ownership;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, Identity};
pub use context::{IntakeContext, OwnerContext};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{QuestionId, ResponseId, SummaryId, SurveyId, UserId};
pub use ownership::OwnedByUser;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
