//! Presence and message router for Bazaar.
//!
//! The router owns the customer and seller rosters, the admin session, and
//! the open connections' outboxes. Registration events rebroadcast roster
//! snapshots to everyone; chat events are delivered to exactly one
//! connection, or dropped when the recipient is offline.

use crate::admin::AdminSession;
use crate::outbox::{OutboxReceiver, Outboxes};
use crate::roster::{ConnectionRecord, Roster};
use bazaar_protocol::{ChatMessage, ClientEvent, ConnectionId, ServerEvent};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, trace};

/// Maximum actor id length.
pub const MAX_ACTOR_ID_LENGTH: usize = 256;

/// Router errors.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The event payload cannot be applied to roster state.
    #[error("Malformed event: {0}")]
    MalformedEvent(String),
}

/// What happens when an actor id that is already on a roster registers
/// again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReregistrationPolicy {
    /// Keep the first record. The actor stays bound to its original
    /// connection until that connection disconnects.
    #[default]
    KeepFirst,
    /// Move the existing record onto the new connection and profile.
    Rebind,
}

/// Router configuration.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Handling of repeated registrations.
    pub reregistration: ReregistrationPolicy,
    /// Longest accepted actor id.
    pub max_actor_id_length: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            reregistration: ReregistrationPolicy::KeepFirst,
            max_actor_id_length: MAX_ACTOR_ID_LENGTH,
        }
    }
}

/// Direction of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageRoute {
    SellerToCustomer,
    CustomerToSeller,
    AdminToSeller,
    SellerToAdmin,
}

impl MessageRoute {
    /// Wrap a message in the event its recipient expects.
    #[must_use]
    pub fn into_event(self, message: ChatMessage) -> ServerEvent {
        match self {
            MessageRoute::SellerToCustomer => ServerEvent::SellerMessage(message),
            MessageRoute::CustomerToSeller => ServerEvent::CustomerMessage(message),
            MessageRoute::AdminToSeller => ServerEvent::AdminMessage(message),
            MessageRoute::SellerToAdmin => ServerEvent::SellerToAdminMessage(message),
        }
    }
}

/// Validate an actor id.
///
/// # Errors
///
/// Returns an error message if the id is empty, too long, or contains
/// control characters.
pub fn validate_actor_id(actor_id: &str, max_length: usize) -> Result<(), &'static str> {
    if actor_id.is_empty() {
        return Err("Actor id cannot be empty");
    }
    if actor_id.len() > max_length {
        return Err("Actor id too long");
    }
    if actor_id.chars().any(char::is_control) {
        return Err("Actor id contains control characters");
    }
    Ok(())
}

/// The presence and message router.
///
/// All operations take `&mut self` and complete synchronously; callers are
/// expected to feed events one at a time in arrival order.
#[derive(Debug)]
pub struct PresenceRouter {
    customers: Roster,
    sellers: Roster,
    admin: Option<AdminSession>,
    outboxes: Outboxes,
    config: RouterConfig,
}

impl PresenceRouter {
    /// Create a new router with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Create a new router with custom configuration.
    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        info!("Creating presence router with config: {:?}", config);
        Self {
            customers: Roster::new(),
            sellers: Roster::new(),
            admin: None,
            outboxes: Outboxes::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    #[must_use]
    pub fn customers(&self) -> &Roster {
        &self.customers
    }

    #[must_use]
    pub fn sellers(&self) -> &Roster {
        &self.sellers
    }

    #[must_use]
    pub fn admin(&self) -> Option<&AdminSession> {
        self.admin.as_ref()
    }

    /// Get router statistics.
    #[must_use]
    pub fn stats(&self) -> RouterStats {
        RouterStats {
            connections: self.outboxes.len(),
            customers: self.customers.len(),
            sellers: self.sellers.len(),
            admin_online: self.admin.is_some(),
        }
    }

    /// Open a connection and return the queue its events arrive on.
    pub fn connect(&mut self, connection_id: ConnectionId) -> OutboxReceiver {
        self.outboxes.open(connection_id)
    }

    /// Close a connection and clean up everything registered from it.
    ///
    /// Returns the number of deliveries made to the remaining connections.
    pub fn disconnect(&mut self, connection_id: &ConnectionId) -> usize {
        self.outboxes.close(connection_id);
        self.handle_disconnect(connection_id)
    }

    /// Apply an inbound event received on a connection.
    ///
    /// Returns the number of deliveries made.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be applied. Roster state is
    /// untouched in that case.
    pub fn handle(
        &mut self,
        connection_id: &ConnectionId,
        event: ClientEvent,
    ) -> Result<usize, RouterError> {
        match event {
            ClientEvent::AddUser(reg) => {
                self.register_customer(reg.customer_id, connection_id.clone(), reg.user_info)
            }
            ClientEvent::AddSeller(reg) => {
                self.register_seller(reg.seller_id, connection_id.clone(), reg.user_info)
            }
            ClientEvent::AddAdmin(profile) => self.register_admin(profile, connection_id.clone()),
            ClientEvent::SendSellerMessage(msg) => {
                Ok(self.route_message(MessageRoute::SellerToCustomer, msg))
            }
            ClientEvent::SendCustomerMessage(msg) => {
                Ok(self.route_message(MessageRoute::CustomerToSeller, msg))
            }
            ClientEvent::SendMessageAdminToSeller(msg) => {
                Ok(self.route_message(MessageRoute::AdminToSeller, msg))
            }
            ClientEvent::SendMessageSellerToAdmin(msg) => {
                Ok(self.route_message(MessageRoute::SellerToAdmin, msg))
            }
        }
    }

    /// Register a customer and broadcast both rosters.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor id is invalid.
    pub fn register_customer(
        &mut self,
        actor_id: impl Into<String>,
        connection_id: ConnectionId,
        profile: Value,
    ) -> Result<usize, RouterError> {
        let record = self.record(actor_id.into(), connection_id, profile)?;
        let policy = self.config.reregistration;
        register(&mut self.customers, policy, record);

        Ok(self.broadcast_sellers() + self.broadcast_customers())
    }

    /// Register a seller, broadcast both rosters, and signal seller activity
    /// to the admin dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor id is invalid.
    pub fn register_seller(
        &mut self,
        actor_id: impl Into<String>,
        connection_id: ConnectionId,
        profile: Value,
    ) -> Result<usize, RouterError> {
        let record = self.record(actor_id.into(), connection_id, profile)?;
        let policy = self.config.reregistration;
        register(&mut self.sellers, policy, record);

        Ok(self.broadcast_sellers()
            + self.broadcast_customers()
            + self.outboxes.broadcast(ServerEvent::admin_status(true)))
    }

    /// Register the admin, replacing any admin already connected.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is not a JSON object.
    pub fn register_admin(
        &mut self,
        profile: Value,
        connection_id: ConnectionId,
    ) -> Result<usize, RouterError> {
        let Value::Object(profile) = profile else {
            return Err(RouterError::MalformedEvent(
                "Admin profile must be an object".to_string(),
            ));
        };

        let session = AdminSession::new(connection_id, profile);
        if let Some(previous) = self.admin.replace(session) {
            debug!(
                previous = %previous.connection_id(),
                connection = ?self.admin.as_ref().map(AdminSession::connection_id),
                "Admin session superseded"
            );
        }

        Ok(self.broadcast_sellers() + self.outboxes.broadcast(ServerEvent::admin_status(true)))
    }

    /// Deliver a chat message to its recipient's connection.
    ///
    /// Returns `1` if delivered, `0` if the recipient is not connected.
    pub fn route_message(&self, route: MessageRoute, message: ChatMessage) -> usize {
        let target = match route {
            MessageRoute::SellerToCustomer => self.customers.connection_of(&message.recever_id),
            MessageRoute::CustomerToSeller | MessageRoute::AdminToSeller => {
                self.sellers.connection_of(&message.recever_id)
            }
            MessageRoute::SellerToAdmin => self.admin.as_ref().map(AdminSession::connection_id),
        };

        let Some(target) = target.cloned() else {
            trace!(route = ?route, recipient = %message.recever_id, "Recipient not connected");
            return 0;
        };

        let delivered = self.outboxes.send_to(&target, route.into_event(message));
        trace!(route = ?route, connection = %target, delivered, "Routed message");
        delivered
    }

    /// Drop everything registered from a connection and broadcast the
    /// updated state to the connections that remain.
    pub fn handle_disconnect(&mut self, connection_id: &ConnectionId) -> usize {
        let customers = self.customers.remove_connection(connection_id);
        let sellers = self.sellers.remove_connection(connection_id);

        let admin_left = self
            .admin
            .as_ref()
            .is_some_and(|admin| admin.connection_id() == connection_id);
        if admin_left {
            self.admin = None;
        }

        debug!(
            connection = %connection_id,
            customers = customers.len(),
            sellers = sellers.len(),
            admin = admin_left,
            "Connection cleaned up"
        );

        self.outboxes.broadcast(ServerEvent::admin_status(false))
            + self.broadcast_sellers()
            + self.broadcast_customers()
    }

    fn record(
        &self,
        actor_id: String,
        connection_id: ConnectionId,
        profile: Value,
    ) -> Result<ConnectionRecord, RouterError> {
        validate_actor_id(&actor_id, self.config.max_actor_id_length)
            .map_err(|e| RouterError::MalformedEvent(e.to_string()))?;
        Ok(ConnectionRecord::new(actor_id, connection_id, profile))
    }

    fn broadcast_sellers(&self) -> usize {
        self.outboxes
            .broadcast(ServerEvent::ActiveSeller(self.sellers.seller_snapshot()))
    }

    fn broadcast_customers(&self) -> usize {
        self.outboxes
            .broadcast(ServerEvent::ActiveCustomer(self.customers.customer_snapshot()))
    }
}

impl Default for PresenceRouter {
    fn default() -> Self {
        Self::new()
    }
}

fn register(roster: &mut Roster, policy: ReregistrationPolicy, record: ConnectionRecord) -> bool {
    match policy {
        ReregistrationPolicy::KeepFirst => roster.insert(record),
        ReregistrationPolicy::Rebind => roster.upsert(record),
    }
}

/// Router statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterStats {
    /// Number of open connections.
    pub connections: usize,
    /// Number of registered customers.
    pub customers: usize,
    /// Number of registered sellers.
    pub sellers: usize,
    /// Whether an admin is connected.
    pub admin_online: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_protocol::{AdminStatus, CustomerPresence, SellerPresence};
    use serde_json::json;
    use std::sync::Arc;

    fn drain(rx: &mut OutboxReceiver) -> Vec<Arc<ServerEvent>> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn names(events: &[Arc<ServerEvent>]) -> Vec<&'static str> {
        events.iter().map(|e| e.name()).collect()
    }

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::from(id)
    }

    #[test]
    fn test_customer_to_seller_scenario() {
        let mut router = PresenceRouter::new();
        let mut rx_a = router.connect(conn("sockA"));
        let mut rx_b = router.connect(conn("sockB"));

        router
            .register_customer("cust1", conn("sockA"), json!({ "name": "Alice" }))
            .unwrap();
        router
            .register_seller("sell1", conn("sockB"), json!({ "name": "Bob" }))
            .unwrap();
        drain(&mut rx_a);
        drain(&mut rx_b);

        let msg = ChatMessage::new("cust1", "sell1", "hi");
        assert_eq!(router.route_message(MessageRoute::CustomerToSeller, msg.clone()), 1);

        assert!(drain(&mut rx_a).is_empty());
        let received = drain(&mut rx_b);
        assert_eq!(received.len(), 1);
        assert_eq!(*received[0], ServerEvent::CustomerMessage(msg.clone()));

        router.disconnect(&conn("sockB"));
        assert!(!router.sellers().contains("sell1"));
        drain(&mut rx_a);

        assert_eq!(router.route_message(MessageRoute::CustomerToSeller, msg), 0);
        assert!(drain(&mut rx_a).is_empty());
    }

    #[test]
    fn test_reregistration_keeps_first_connection() {
        let mut router = PresenceRouter::new();
        let _rx_a = router.connect(conn("sockA"));
        let mut rx_b = router.connect(conn("sockB"));

        router.register_seller("sell1", conn("sockA"), json!({})).unwrap();
        router.register_seller("sell1", conn("sockB"), json!({})).unwrap();

        assert_eq!(router.sellers().len(), 1);
        assert_eq!(router.sellers().connection_of("sell1"), Some(&conn("sockA")));

        drain(&mut rx_b);
        let msg = ChatMessage::new("cust1", "sell1", "hi");
        router.route_message(MessageRoute::CustomerToSeller, msg);
        assert!(drain(&mut rx_b).is_empty());
    }

    #[test]
    fn test_rebind_policy_moves_actor() {
        let mut router = PresenceRouter::with_config(RouterConfig {
            reregistration: ReregistrationPolicy::Rebind,
            ..Default::default()
        });
        let _rx_a = router.connect(conn("sockA"));
        let mut rx_b = router.connect(conn("sockB"));

        router.register_seller("sell1", conn("sockA"), json!({})).unwrap();
        router.register_seller("sell1", conn("sockB"), json!({ "v": 2 })).unwrap();
        drain(&mut rx_b);

        let msg = ChatMessage::new("cust1", "sell1", "hi");
        assert_eq!(router.route_message(MessageRoute::CustomerToSeller, msg), 1);
        assert_eq!(drain(&mut rx_b).len(), 1);

        // The stale connection no longer owns the seller.
        router.disconnect(&conn("sockA"));
        assert!(router.sellers().contains("sell1"));
    }

    #[test]
    fn test_rosters_stay_unique() {
        let mut router = PresenceRouter::new();
        for (actor, connection) in [("a", "s1"), ("b", "s2"), ("a", "s3"), ("b", "s1"), ("a", "s1")] {
            router.register_customer(actor, conn(connection), json!(null)).unwrap();
            router.register_seller(actor, conn(connection), json!(null)).unwrap();
        }

        for roster in [router.customers(), router.sellers()] {
            let mut ids: Vec<&str> = roster.iter().map(|r| r.actor_id.as_str()).collect();
            let before = ids.len();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), before);
            assert_eq!(before, 2);
        }
    }

    #[test]
    fn test_registration_broadcast_order() {
        let mut router = PresenceRouter::new();
        let mut rx = router.connect(conn("watcher"));

        router.register_customer("cust1", conn("sockA"), json!("Alice")).unwrap();
        assert_eq!(names(&drain(&mut rx)), vec!["activeSeller", "activeCustomer"]);

        router.register_seller("sell1", conn("sockB"), json!("Bob")).unwrap();
        let events = drain(&mut rx);
        assert_eq!(names(&events), vec!["activeSeller", "activeCustomer", "activeAdmin"]);
        assert_eq!(
            *events[0],
            ServerEvent::ActiveSeller(vec![SellerPresence {
                seller_id: "sell1".to_string(),
                socket_id: conn("sockB"),
                user_info: json!("Bob"),
            }])
        );
        assert_eq!(
            *events[1],
            ServerEvent::ActiveCustomer(vec![CustomerPresence {
                customer_id: "cust1".to_string(),
                socket_id: conn("sockA"),
                user_info: json!("Alice"),
            }])
        );
        assert_eq!(*events[2], ServerEvent::ActiveAdmin(AdminStatus { status: true }));

        router.register_admin(json!({ "name": "root" }), conn("sockC")).unwrap();
        assert_eq!(names(&drain(&mut rx)), vec!["activeSeller", "activeAdmin"]);

        router.disconnect(&conn("sockA"));
        let events = drain(&mut rx);
        assert_eq!(names(&events), vec!["activeAdmin", "activeSeller", "activeCustomer"]);
        assert_eq!(*events[0], ServerEvent::admin_status(false));
        assert_eq!(*events[2], ServerEvent::ActiveCustomer(vec![]));
    }

    #[test]
    fn test_broadcast_reaches_unregistered_connections() {
        let mut router = PresenceRouter::new();
        let mut rx1 = router.connect(conn("c1"));
        let mut rx2 = router.connect(conn("c2"));

        let delivered = router.register_customer("cust1", conn("c1"), json!({})).unwrap();
        assert_eq!(delivered, 4);
        assert_eq!(drain(&mut rx1).len(), 2);
        assert_eq!(drain(&mut rx2).len(), 2);
    }

    #[test]
    fn test_disconnect_broadcasts_only_to_remaining() {
        let mut router = PresenceRouter::new();
        let mut rx_a = router.connect(conn("sockA"));
        let mut rx_b = router.connect(conn("sockB"));

        assert_eq!(router.disconnect(&conn("sockB")), 3);
        assert_eq!(drain(&mut rx_a).len(), 3);
        assert!(drain(&mut rx_b).is_empty());
    }

    #[test]
    fn test_route_to_absent_recipient_is_silent() {
        let mut router = PresenceRouter::new();
        let mut rx = router.connect(conn("sockA"));

        for route in [
            MessageRoute::SellerToCustomer,
            MessageRoute::CustomerToSeller,
            MessageRoute::AdminToSeller,
            MessageRoute::SellerToAdmin,
        ] {
            assert_eq!(router.route_message(route, ChatMessage::new("x", "nobody", "hi")), 0);
        }
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_each_route_reaches_its_recipient() {
        let mut router = PresenceRouter::new();
        let mut rx_cust = router.connect(conn("sockC"));
        let mut rx_sell = router.connect(conn("sockS"));
        let mut rx_admin = router.connect(conn("sockA"));

        router.register_customer("cust1", conn("sockC"), json!({})).unwrap();
        router.register_seller("sell1", conn("sockS"), json!({})).unwrap();
        router.register_admin(json!({}), conn("sockA")).unwrap();
        drain(&mut rx_cust);
        drain(&mut rx_sell);
        drain(&mut rx_admin);

        router.route_message(MessageRoute::SellerToCustomer, ChatMessage::new("sell1", "cust1", "a"));
        router.route_message(MessageRoute::CustomerToSeller, ChatMessage::new("cust1", "sell1", "b"));
        router.route_message(MessageRoute::AdminToSeller, ChatMessage::new("admin", "sell1", "c"));
        // The admin is addressed by session, whatever the receiver id says.
        router.route_message(MessageRoute::SellerToAdmin, ChatMessage::new("sell1", "", "d"));

        assert_eq!(names(&drain(&mut rx_cust)), vec!["seller_message"]);
        assert_eq!(
            names(&drain(&mut rx_sell)),
            vec!["customer_message", "receved_admin_message"]
        );
        assert_eq!(names(&drain(&mut rx_admin)), vec!["receved_seller_message"]);
    }

    #[test]
    fn test_message_passes_through_unchanged() {
        let mut router = PresenceRouter::new();
        let mut rx = router.connect(conn("sockB"));
        router.register_seller("sell1", conn("sockB"), json!({})).unwrap();
        drain(&mut rx);

        let msg = ChatMessage::new("cust1", "sell1", "hi")
            .with_field("name", json!("Alice"))
            .with_field("meta", json!({ "order": 42 }));
        router.route_message(MessageRoute::CustomerToSeller, msg.clone());

        let events = drain(&mut rx);
        assert_eq!(*events[0], ServerEvent::CustomerMessage(msg));
    }

    #[test]
    fn test_disconnect_cleans_every_roster() {
        let mut router = PresenceRouter::new();
        router.register_customer("cust1", conn("shared"), json!({})).unwrap();
        router.register_seller("sell1", conn("shared"), json!({})).unwrap();
        router.register_admin(json!({}), conn("shared")).unwrap();
        router.register_customer("cust2", conn("other"), json!({})).unwrap();

        router.handle_disconnect(&conn("shared"));

        assert!(router.customers().iter().all(|r| r.connection_id != conn("shared")));
        assert!(router.sellers().is_empty());
        assert!(router.admin().is_none());
        assert!(router.customers().contains("cust2"));
    }

    #[test]
    fn test_other_disconnect_keeps_admin() {
        let mut router = PresenceRouter::new();
        router.register_admin(json!({}), conn("admin")).unwrap();

        router.handle_disconnect(&conn("someone-else"));
        assert!(router.admin().is_some());
    }

    #[test]
    fn test_last_admin_wins() {
        let mut router = PresenceRouter::new();
        router.register_admin(json!({ "name": "first" }), conn("sock1")).unwrap();
        router.register_admin(json!({ "name": "second" }), conn("sock2")).unwrap();

        let admin = router.admin().unwrap();
        assert_eq!(admin.connection_id(), &conn("sock2"));
        assert_eq!(admin.profile().get("name"), Some(&json!("second")));

        // The evicted admin's disconnect does not clear the new session.
        router.handle_disconnect(&conn("sock1"));
        assert!(router.admin().is_some());
    }

    #[test]
    fn test_admin_email_stripped() {
        let mut router = PresenceRouter::new();
        router
            .register_admin(json!({ "email": "x@y.com", "name": "A" }), conn("sockA"))
            .unwrap();

        let profile = router.admin().unwrap().profile();
        assert!(!profile.contains_key("email"));
        assert_eq!(profile.get("name"), Some(&json!("A")));
    }

    #[test]
    fn test_malformed_events_leave_state_untouched() {
        let mut router = PresenceRouter::new();
        router.register_customer("cust1", conn("sockA"), json!({})).unwrap();

        assert!(matches!(
            router.register_customer("", conn("sockB"), json!({})),
            Err(RouterError::MalformedEvent(_))
        ));
        assert!(router.register_seller("bad\nid", conn("sockB"), json!({})).is_err());
        assert!(router
            .register_seller("x".repeat(MAX_ACTOR_ID_LENGTH + 1), conn("sockB"), json!({}))
            .is_err());
        assert!(router.register_admin(json!("root"), conn("sockB")).is_err());

        assert_eq!(router.customers().len(), 1);
        assert!(router.sellers().is_empty());
        assert!(router.admin().is_none());
    }

    #[test]
    fn test_handle_dispatch() {
        let mut router = PresenceRouter::new();
        let mut rx = router.connect(conn("sockB"));

        router
            .handle(&conn("sockB"), ClientEvent::add_seller("sell1", json!({})))
            .unwrap();
        assert!(router.sellers().contains("sell1"));
        drain(&mut rx);

        let delivered = router
            .handle(
                &conn("sockA"),
                ClientEvent::SendCustomerMessage(ChatMessage::new("cust1", "sell1", "hi")),
            )
            .unwrap();
        assert_eq!(delivered, 1);
        assert_eq!(names(&drain(&mut rx)), vec!["customer_message"]);

        router
            .handle(&conn("sockB"), ClientEvent::AddAdmin(json!({ "email": "a@b.c" })))
            .unwrap();
        assert_eq!(router.admin().unwrap().connection_id(), &conn("sockB"));
    }

    #[test]
    fn test_router_stats() {
        let mut router = PresenceRouter::new();
        let _rx1 = router.connect(conn("c1"));
        let _rx2 = router.connect(conn("c2"));
        router.register_customer("cust1", conn("c1"), json!({})).unwrap();
        router.register_admin(json!({}), conn("c2")).unwrap();

        let stats = router.stats();
        assert_eq!(stats.connections, 2);
        assert_eq!(stats.customers, 1);
        assert_eq!(stats.sellers, 0);
        assert!(stats.admin_online);
    }

    #[test]
    fn test_actor_id_validation() {
        assert!(validate_actor_id("64f0c1e2a9", MAX_ACTOR_ID_LENGTH).is_ok());
        assert!(validate_actor_id("", MAX_ACTOR_ID_LENGTH).is_err());
        assert!(validate_actor_id("abc", 2).is_err());
        assert!(validate_actor_id("a\u{0}b", MAX_ACTOR_ID_LENGTH).is_err());
    }
}
