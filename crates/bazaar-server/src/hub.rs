//! The hub: a single task that owns the presence router.
//!
//! Connection tasks never touch roster state directly. They send commands
//! over one queue and the hub applies them strictly in arrival order, so
//! every router operation runs to completion before the next one starts.

use crate::metrics;
use bazaar_core::{OutboxReceiver, PresenceRouter, RouterStats};
use bazaar_protocol::{ClientEvent, ConnectionId};
use std::time::Instant;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Reasons a connection cannot be admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OpenError {
    /// The connection limit has been reached.
    #[error("Connection limit reached")]
    AtCapacity,

    /// The hub task is gone.
    #[error("Hub stopped")]
    Stopped,
}

/// Commands accepted by the hub.
#[derive(Debug)]
pub enum HubCommand {
    /// A transport connection opened.
    Open {
        connection_id: ConnectionId,
        reply: oneshot::Sender<Result<OutboxReceiver, OpenError>>,
    },
    /// An event arrived on a connection.
    Event {
        connection_id: ConnectionId,
        event: ClientEvent,
    },
    /// A transport connection closed.
    Close { connection_id: ConnectionId },
    /// Snapshot router statistics.
    Stats { reply: oneshot::Sender<RouterStats> },
}

/// Cloneable handle used by connection tasks and HTTP handlers.
#[derive(Debug, Clone)]
pub struct HubHandle {
    tx: mpsc::UnboundedSender<HubCommand>,
}

impl HubHandle {
    /// Admit a connection.
    ///
    /// On success returns a lease that reports the close when dropped,
    /// together with the connection's outbox receiver.
    ///
    /// # Errors
    ///
    /// Returns [`OpenError::AtCapacity`] when the connection limit is
    /// reached, or [`OpenError::Stopped`] if the hub is gone.
    pub async fn open(
        &self,
        connection_id: ConnectionId,
    ) -> Result<(ConnectionLease, OutboxReceiver), OpenError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(HubCommand::Open {
                connection_id: connection_id.clone(),
                reply,
            })
            .map_err(|_| OpenError::Stopped)?;

        let outbox = rx.await.map_err(|_| OpenError::Stopped)??;
        let lease = ConnectionLease {
            connection_id,
            hub: self.clone(),
        };
        Ok((lease, outbox))
    }

    /// Forward an inbound event.
    pub fn dispatch(&self, connection_id: ConnectionId, event: ClientEvent) {
        if self
            .tx
            .send(HubCommand::Event {
                connection_id,
                event,
            })
            .is_err()
        {
            warn!("Hub stopped; dropping event");
        }
    }

    /// Report a closed connection.
    pub fn close(&self, connection_id: ConnectionId) {
        if self.tx.send(HubCommand::Close { connection_id }).is_err() {
            warn!("Hub stopped; dropping close");
        }
    }

    /// Fetch router statistics.
    pub async fn stats(&self) -> Option<RouterStats> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(HubCommand::Stats { reply }).ok()?;
        rx.await.ok()
    }
}

/// An admitted connection. Dropping it closes the connection in the hub.
#[derive(Debug)]
pub struct ConnectionLease {
    connection_id: ConnectionId,
    hub: HubHandle,
}

impl ConnectionLease {
    /// The admitted connection's id.
    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }
}

impl Drop for ConnectionLease {
    fn drop(&mut self) {
        self.hub.close(self.connection_id.clone());
    }
}

/// Spawn the hub task around a router.
///
/// At most `max_connections` connections are admitted at once. The hub
/// runs until every [`HubHandle`] has been dropped.
#[must_use]
pub fn spawn(
    router: PresenceRouter,
    max_connections: usize,
) -> (HubHandle, JoinHandle<PresenceRouter>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run(router, max_connections, rx));
    (HubHandle { tx }, task)
}

async fn run(
    mut router: PresenceRouter,
    max_connections: usize,
    mut commands: mpsc::UnboundedReceiver<HubCommand>,
) -> PresenceRouter {
    while let Some(command) = commands.recv().await {
        apply(&mut router, max_connections, command);
    }

    debug!("Hub stopped");
    router
}

fn apply(router: &mut PresenceRouter, max_connections: usize, command: HubCommand) {
    match command {
        HubCommand::Open {
            connection_id,
            reply,
        } => {
            if router.stats().connections >= max_connections {
                debug!(connection = %connection_id, "Connection limit reached");
                let _ = reply.send(Err(OpenError::AtCapacity));
                return;
            }

            let outbox = router.connect(connection_id.clone());
            if reply.send(Ok(outbox)).is_err() {
                // The connection task went away while waiting.
                router.disconnect(&connection_id);
            }
        }

        HubCommand::Event {
            connection_id,
            event,
        } => {
            let start = Instant::now();
            let name = event.name();

            match router.handle(&connection_id, event) {
                Ok(deliveries) => metrics::record_event(name, deliveries),
                Err(e) => {
                    warn!(connection = %connection_id, event = name, error = %e, "Rejected event");
                    metrics::record_error("malformed_event");
                }
            }

            metrics::record_latency(start.elapsed().as_secs_f64());
            metrics::set_rosters(&router.stats());
        }

        HubCommand::Close { connection_id } => {
            router.disconnect(&connection_id);
            metrics::set_rosters(&router.stats());
        }

        HubCommand::Stats { reply } => {
            let _ = reply.send(router.stats());
        }
    }
}
