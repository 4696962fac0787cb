//! Notification collaborator.

use tokio::sync::broadcast;
use tracing::debug;

use hostdesk_core::events::{DomainEvent, ServiceEvent};

/// Receives lifecycle notifications after a successful transition.
///
/// Fire-and-forget: delivery is the implementation's concern and never
/// fails the command that triggered it.
pub trait EventNotifier: Send + Sync {
    /// Announces `event`.
    fn notify(&self, event: ServiceEvent);
}

/// Publishes events on an in-process broadcast channel.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    /// Broadcast sender.
    sender: broadcast::Sender<DomainEvent>,
}

impl BroadcastNotifier {
    /// Creates a notifier buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to published events.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EventNotifier for BroadcastNotifier {
    fn notify(&self, event: ServiceEvent) {
        let name = event.name();
        let service_id = event.service_id();
        // No subscribers is fine.
        let delivered = self.sender.send(DomainEvent::from(event)).unwrap_or(0);
        debug!(event = name, service_id = %service_id, delivered, "Service event published");
    }
}
