//! Per-connection delivery queues.
//!
//! Every open connection owns an unbounded queue. The router only ever
//! enqueues; the transport drains the receiving end at its own pace.

use bazaar_protocol::{ConnectionId, ServerEvent};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Sending half of a connection's queue.
pub type Outbox = mpsc::UnboundedSender<Arc<ServerEvent>>;

/// Receiving half of a connection's queue, held by the transport.
pub type OutboxReceiver = mpsc::UnboundedReceiver<Arc<ServerEvent>>;

/// Registry of open connections and their queues.
#[derive(Debug, Default)]
pub struct Outboxes {
    senders: HashMap<ConnectionId, Outbox>,
}

impl Outboxes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open connections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.senders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }

    #[must_use]
    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.senders.contains_key(connection_id)
    }

    /// Open a queue for a connection.
    ///
    /// Opening an id twice replaces the earlier queue, which closes the
    /// earlier receiver.
    pub fn open(&mut self, connection_id: ConnectionId) -> OutboxReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        debug!(connection = %connection_id, "Outbox opened");
        self.senders.insert(connection_id, tx);
        rx
    }

    /// Close a connection's queue.
    ///
    /// Returns `true` if the connection was open.
    pub fn close(&mut self, connection_id: &ConnectionId) -> bool {
        let removed = self.senders.remove(connection_id).is_some();
        if removed {
            debug!(connection = %connection_id, "Outbox closed");
        }
        removed
    }

    /// Deliver an event to every open connection.
    ///
    /// Returns the number of queues that accepted the event. Queues whose
    /// receiver is gone are skipped.
    pub fn broadcast(&self, event: ServerEvent) -> usize {
        let event = Arc::new(event);
        let delivered = self
            .senders
            .values()
            .filter(|tx| tx.send(Arc::clone(&event)).is_ok())
            .count();
        trace!(event = event.name(), recipients = delivered, "Broadcast");
        delivered
    }

    /// Deliver an event to a single connection.
    ///
    /// Returns `1` if the event was queued, `0` otherwise.
    pub fn send_to(&self, connection_id: &ConnectionId, event: ServerEvent) -> usize {
        match self.senders.get(connection_id) {
            Some(tx) if tx.send(Arc::new(event)).is_ok() => 1,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_reaches_every_open_connection() {
        let mut outboxes = Outboxes::new();
        let mut rx1 = outboxes.open("conn-1".into());
        let mut rx2 = outboxes.open("conn-2".into());

        assert_eq!(outboxes.broadcast(ServerEvent::admin_status(true)), 2);

        assert_eq!(*rx1.try_recv().unwrap(), ServerEvent::admin_status(true));
        assert_eq!(*rx2.try_recv().unwrap(), ServerEvent::admin_status(true));
    }

    #[test]
    fn test_send_to_closed_or_unknown_is_noop() {
        let mut outboxes = Outboxes::new();
        let rx = outboxes.open("conn-1".into());
        drop(rx);

        assert_eq!(outboxes.send_to(&"conn-1".into(), ServerEvent::admin_status(true)), 0);
        assert_eq!(outboxes.send_to(&"ghost".into(), ServerEvent::admin_status(true)), 0);
        assert_eq!(outboxes.broadcast(ServerEvent::admin_status(false)), 0);
    }

    #[test]
    fn test_close() {
        let mut outboxes = Outboxes::new();
        let mut rx = outboxes.open("conn-1".into());

        assert!(outboxes.close(&"conn-1".into()));
        assert!(!outboxes.close(&"conn-1".into()));
        assert!(outboxes.is_empty());

        // Sender dropped, so the receiver observes the end of the queue.
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }
}
