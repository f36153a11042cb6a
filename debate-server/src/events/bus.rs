//! Broadcast hub carrying server events to every connection.

use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

use super::types::ServerEvent;

/// Channel capacity for broadcast
const CHANNEL_CAPACITY: usize = 256;

/// Shared reference to EventBus
pub type SharedEventBus = Arc<EventBus>;

/// Fan-out pub/sub over a single Tokio broadcast channel.
///
/// There is one implicit room: every subscriber sees every event. Slow
/// subscribers that overflow the channel lose the oldest events rather
/// than stalling publishers.
pub struct EventBus {
    sender: broadcast::Sender<ServerEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Wrap in Arc for sharing across tasks.
    pub fn shared(self) -> SharedEventBus {
        Arc::new(self)
    }

    /// Publish an event to all subscribers.
    ///
    /// Publishing with zero live subscribers is not an error; the event
    /// is simply dropped.
    pub fn publish(&self, event: ServerEvent) {
        let event_type = event.event_type();
        match self.sender.send(event) {
            Ok(receivers) => debug!(event_type, receivers, "Event published"),
            Err(_) => debug!(event_type, "Event published (no receivers)"),
        }
    }

    /// Subscribe to all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
