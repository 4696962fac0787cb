//! Domain events emitted by HostDesk operations.
//!
//! Events are handed to the notification collaborator, which owns delivery
//! (mail, webhooks, audit). Emitting an event never fails the operation that
//! produced it.

pub mod service;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use service::ServiceEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A hosting-service lifecycle event.
    Service(ServiceEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            payload,
        }
    }
}

impl From<ServiceEvent> for DomainEvent {
    fn from(event: ServiceEvent) -> Self {
        Self::new(EventPayload::Service(event))
    }
}
