//! Domain events emitted by the access core.
//!
//! Events are published on the [`EventBus`] and consumed by audit
//! views, the terminal shell, and tests.

pub mod access;
pub mod bus;
pub mod session;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use access::AccessEvent;
pub use bus::EventBus;
pub use session::SessionEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The user who caused the event (if known).
    pub actor_id: Option<String>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A session lifecycle event.
    Session(SessionEvent),
    /// A navigation authorization event.
    Access(AccessEvent),
}

impl DomainEvent {
    /// Create a new domain event stamped at `timestamp`.
    pub fn new(timestamp: DateTime<Utc>, actor_id: Option<String>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            actor_id,
            payload,
        }
    }

    /// Create a session event.
    pub fn session(timestamp: DateTime<Utc>, actor_id: Option<String>, event: SessionEvent) -> Self {
        Self::new(timestamp, actor_id, EventPayload::Session(event))
    }

    /// Create an access event.
    pub fn access(timestamp: DateTime<Utc>, actor_id: Option<String>, event: AccessEvent) -> Self {
        Self::new(timestamp, actor_id, EventPayload::Access(event))
    }
}
