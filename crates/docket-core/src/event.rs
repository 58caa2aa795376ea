//! Domain event abstractions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;

/// Trait that all domain events implement.
///
/// The type tag is the discriminant the bus dispatches on; the payload
/// carries the event-specific attributes and nothing else.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the stable, dot-namespaced type tag (e.g. `users.created`).
    fn event_type(&self) -> &'static str;

    /// Serializes the event-specific attributes to JSON.
    fn to_payload(&self) -> serde_json::Value;
}

/// Immutable record of something that happened in the domain.
///
/// Identity and timestamp are fixed at construction; all fields are
/// private and reachable only through accessors, so an envelope can never
/// be mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    event_id: Uuid,
    event_type: String,
    occurred_at: DateTime<Utc>,
    payload: serde_json::Value,
}

impl EventEnvelope {
    /// Wraps a domain event, stamping a fresh identity and the time of
    /// occurrence.
    #[must_use]
    pub fn new(event: &dyn DomainEvent, clock: &dyn Clock) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_type: event.event_type().to_owned(),
            occurred_at: clock.now(),
            payload: event.to_payload(),
        }
    }

    /// Unique event identifier, never reused.
    #[must_use]
    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    /// Type tag used as the dispatch key.
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Timestamp fixed at construction.
    #[must_use]
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Event-specific attributes.
    #[must_use]
    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }
}
