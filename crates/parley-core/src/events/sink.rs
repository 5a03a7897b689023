//! Event sinks: where lifecycle notifications go.
//!
//! Emission is fire-and-forget: a sink never blocks the chat turn and never
//! reports back to it.

use super::types::ChatEvent;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Receiver of lifecycle notifications.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ChatEvent);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: ChatEvent) {}
}

/// Logs every event through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: ChatEvent) {
        match &event {
            ChatEvent::MessageSent(e) => info!(
                correlation_id = e.correlation_id.as_deref().unwrap_or("-"),
                chars = e.text.chars().count(),
                "chat message sent"
            ),
            ChatEvent::ResponseReceived(e) => info!(
                correlation_id = e.correlation_id.as_deref().unwrap_or("-"),
                status = e.response.status_code,
                success = e.response.is_success(),
                total_tokens = e.response.total_tokens,
                "chat response received"
            ),
        }
    }
}

/// Bounded queue of events for an async consumer.
///
/// Chat turns push with `try_send`; when the buffer is full or the consumer
/// is gone, the event is dropped with a warning.
pub struct EventBus {
    tx: mpsc::Sender<ChatEvent>,
    rx: tokio::sync::Mutex<mpsc::Receiver<ChatEvent>>,
}

impl EventBus {
    /// Create a new bus with the given buffer capacity.
    pub fn new(buffer_size: usize) -> Self {
        let (tx, rx) = mpsc::channel(buffer_size);
        EventBus {
            tx,
            rx: tokio::sync::Mutex::new(rx),
        }
    }

    /// Consume the next event (waits until one is available).
    pub async fn consume(&self) -> Option<ChatEvent> {
        let mut rx = self.rx.lock().await;
        rx.recv().await
    }

    /// Take an already-queued event without waiting.
    pub fn try_consume(&self) -> Option<ChatEvent> {
        let mut rx = self.rx.try_lock().ok()?;
        rx.try_recv().ok()
    }

    /// Get a clone of the sender (for producers outside the sink trait).
    pub fn sender(&self) -> mpsc::Sender<ChatEvent> {
        self.tx.clone()
    }
}

impl EventSink for EventBus {
    fn emit(&self, event: ChatEvent) {
        let kind = event.kind();
        match self.tx.try_send(event) {
            Ok(()) => debug!(event = kind, "event queued"),
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(event = kind, "event bus full, dropping event")
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!(event = kind, "event bus closed, dropping event")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::{MessageSent, ResponseReceived};
    use crate::types::ChatResponse;

    #[tokio::test]
    async fn test_event_flow() {
        let bus = EventBus::new(10);
        bus.emit(MessageSent::new("Hello!", None).into());

        let received = bus.consume().await.unwrap();
        assert_eq!(received.kind(), "message_sent");
        assert_eq!(received.text(), "Hello!");
    }

    #[tokio::test]
    async fn test_event_ordering() {
        let bus = EventBus::new(10);
        bus.emit(MessageSent::new("q", Some("u1".into())).into());
        bus.emit(ResponseReceived::new("q", ChatResponse::default(), Some("u1".into())).into());

        assert_eq!(bus.consume().await.unwrap().kind(), "message_sent");
        assert_eq!(bus.consume().await.unwrap().kind(), "response_received");
        assert!(bus.try_consume().is_none());
    }

    #[test]
    fn test_full_bus_drops_without_blocking() {
        let bus = EventBus::new(1);
        bus.emit(MessageSent::new("first", None).into());
        bus.emit(MessageSent::new("second", None).into());

        assert_eq!(bus.try_consume().unwrap().text(), "first");
        assert!(bus.try_consume().is_none());
    }

    #[tokio::test]
    async fn test_sender_clone_works() {
        let bus = EventBus::new(10);
        let tx = bus.sender();
        tx.send(MessageSent::new("from clone", None).into())
            .await
            .unwrap();

        assert_eq!(bus.consume().await.unwrap().text(), "from clone");
    }

    #[test]
    fn test_noop_and_tracing_sinks_accept_events() {
        NoopSink.emit(MessageSent::new("x", None).into());
        TracingSink.emit(ResponseReceived::new("x", ChatResponse::default(), None).into());
    }
}
