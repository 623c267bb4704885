//! In-memory event bus.
//!
//! Delivers each event to its subscribed handlers in the caller's task, in
//! subscription order. A bus built with [`InMemoryEventBus::recording`] also
//! keeps a copy of every published event so tests can assert on what
//! happened; the default bus keeps nothing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

/// In-process event bus with optional event capture.
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::recording());
/// bus.subscribe("survey.created.v1", tracker);
/// bus.publish(envelope).await?;
/// assert!(bus.has_event("survey.created.v1"));
/// ```
pub struct InMemoryEventBus {
    handlers: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
    published: Option<RwLock<Vec<EventEnvelope>>>,
}

impl InMemoryEventBus {
    /// A bus that only dispatches.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            published: None,
        }
    }

    /// A bus that also captures every published event.
    pub fn recording() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            published: Some(RwLock::new(Vec::new())),
        }
    }

    pub fn is_recording(&self) -> bool {
        self.published.is_some()
    }

    /// Returns all captured events. Always empty unless recording.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .as_ref()
            .map(|published| {
                published
                    .read()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .clone()
            })
            .unwrap_or_default()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .collect()
    }

    pub fn event_count(&self) -> usize {
        self.published.as_ref().map_or(0, |published| {
            published
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .len()
        })
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        self.published.as_ref().is_some_and(|published| {
            published
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .iter()
                .any(|e| e.event_type == event_type)
        })
    }

    pub fn clear(&self) {
        if let Some(published) = &self.published {
            published
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clear();
        }
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if let Some(published) = &self.published {
            published
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(event.clone());
        }

        // Clone handlers to release lock before await points
        let type_handlers: Vec<Arc<dyn EventHandler>> = {
            let handlers = self
                .handlers
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            handlers
                .get(&event.event_type)
                .cloned()
                .unwrap_or_default()
        };

        let mut errors = Vec::new();
        for handler in type_handlers {
            if let Err(e) = handler.handle(event.clone()).await {
                tracing::warn!(
                    handler = handler.name(),
                    event_type = %event.event_type,
                    error = %e,
                    "Event handler failed"
                );
                errors.push(format!("{}: {}", handler.name(), e));
            }
        }

        if !errors.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Handler errors: {}", errors.join(", ")),
            ));
        }

        Ok(())
    }

    /// Publishes every event even if an earlier one had handler failures.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        let mut first_error = None;
        for event in events {
            if let Err(e) = self.publish(event).await {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        self.handlers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .entry(event_type.to_string())
            .or_default()
            .push(handler);
    }

    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        let mut handlers = self
            .handlers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for event_type in event_types {
            handlers
                .entry(event_type.to_string())
                .or_default()
                .push(Arc::clone(&handler));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn envelope(event_type: &str, aggregate_id: &str) -> EventEnvelope {
        EventEnvelope::new(event_type, aggregate_id, "Survey", json!({}))
    }

    struct CountingHandler(Arc<AtomicUsize>);

    #[async_trait]
    impl EventHandler for CountingHandler {
        async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn name(&self) -> &'static str {
            "CountingHandler"
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl EventHandler for FailingHandler {
        async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::InternalError, "Handler failed"))
        }

        fn name(&self) -> &'static str {
            "FailingHandler"
        }
    }

    #[tokio::test]
    async fn publish_stores_event() {
        let bus = InMemoryEventBus::recording();
        bus.publish(envelope("survey.created.v1", "s-1")).await.unwrap();

        assert_eq!(bus.event_count(), 1);
        assert!(bus.has_event("survey.created.v1"));
    }

    #[tokio::test]
    async fn filters_by_type_and_aggregate() {
        let bus = InMemoryEventBus::recording();
        bus.publish(envelope("survey.created.v1", "s-1")).await.unwrap();
        bus.publish(envelope("survey.closed.v1", "s-2")).await.unwrap();
        bus.publish(envelope("survey.closed.v1", "s-1")).await.unwrap();

        assert_eq!(bus.events_of_type("survey.closed.v1").len(), 2);
        assert_eq!(bus.events_for_aggregate("s-1").len(), 2);
    }

    #[tokio::test]
    async fn subscribe_all_registers_for_each_type() {
        let bus = InMemoryEventBus::recording();
        let counter = Arc::new(AtomicUsize::new(0));

        bus.subscribe_all(
            &["survey.created.v1", "survey.closed.v1"],
            Arc::new(CountingHandler(counter.clone())),
        );

        bus.publish(envelope("survey.created.v1", "1")).await.unwrap();
        bus.publish(envelope("survey.closed.v1", "1")).await.unwrap();
        bus.publish(envelope("survey.summary_attached.v1", "1")).await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn handler_error_is_reported_after_all_handlers_ran() {
        let bus = InMemoryEventBus::recording();
        let counter = Arc::new(AtomicUsize::new(0));

        bus.subscribe("survey.closed.v1", Arc::new(FailingHandler));
        bus.subscribe("survey.closed.v1", Arc::new(CountingHandler(counter.clone())));

        let err = bus.publish(envelope("survey.closed.v1", "1")).await.unwrap_err();

        assert!(err.message.contains("FailingHandler"));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(bus.event_count(), 1);
    }

    #[tokio::test]
    async fn default_bus_dispatches_without_capturing() {
        let bus = InMemoryEventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        bus.subscribe("survey.created.v1", Arc::new(CountingHandler(counter.clone())));

        for _ in 0..3 {
            bus.publish(envelope("survey.created.v1", "1")).await.unwrap();
        }

        assert!(!bus.is_recording());
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert_eq!(bus.event_count(), 0);
        assert!(bus.published_events().is_empty());
    }

    #[tokio::test]
    async fn clear_removes_captured_events() {
        let bus = InMemoryEventBus::recording();
        bus.publish_all(vec![envelope("a.v1", "1"), envelope("b.v1", "2")])
            .await
            .unwrap();
        assert_eq!(bus.event_count(), 2);

        bus.clear();
        assert_eq!(bus.event_count(), 0);
    }
}
