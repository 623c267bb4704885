//! EventPublisher port - Interface for publishing domain events.
//!
//! Handlers publish after their write has committed. The transport behind
//! this port (in-memory, queue, ...) is invisible to the domain.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations deliver at-least-once; handlers may receive duplicates.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish several events in order.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}
