//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod survey;
pub mod user;

pub use survey::*;
pub use user::*;

use crate::domain::foundation::EventEnvelope;
use crate::ports::EventPublisher;

/// Publishes events for a write that has already committed.
///
/// The write stands regardless of what subscribers do, so publish failures
/// are logged rather than returned.
pub(crate) async fn publish_committed(publisher: &dyn EventPublisher, events: Vec<EventEnvelope>) {
    if events.is_empty() {
        return;
    }
    let types: Vec<String> = events.iter().map(|e| e.event_type.clone()).collect();
    if let Err(e) = publisher.publish_all(events).await {
        tracing::warn!(events = ?types, error = %e, "Event publication failed after commit");
    }
}
