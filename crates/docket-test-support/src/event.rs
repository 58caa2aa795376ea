//! Stub domain event with a configurable type tag.

use docket_core::event::DomainEvent;

/// A minimal domain event for exercising the bus and the Unit of Work
/// without dragging in a bounded context.
#[derive(Debug, Clone)]
pub struct StubEvent {
    event_type: &'static str,
    payload: serde_json::Value,
}

impl StubEvent {
    /// Creates a stub event with an empty payload.
    #[must_use]
    pub fn new(event_type: &'static str) -> Self {
        Self {
            event_type,
            payload: serde_json::json!({}),
        }
    }

    /// Creates a stub event carrying the given payload.
    #[must_use]
    pub fn with_payload(event_type: &'static str, payload: serde_json::Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

impl DomainEvent for StubEvent {
    fn event_type(&self) -> &'static str {
        self.event_type
    }

    fn to_payload(&self) -> serde_json::Value {
        self.payload.clone()
    }
}
