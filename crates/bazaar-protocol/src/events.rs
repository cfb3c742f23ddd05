//! Event types exchanged between marketplace clients and the server.
//!
//! Every event is encoded as `{"event": <name>, "data": <payload>}`. Event
//! and field names follow the dashboards' existing wire vocabulary,
//! including its spellings (`receverId`, `receved_*`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::connection::ConnectionId;

/// Current protocol version, announced in the handshake.
pub const PROTOCOL_VERSION: u8 = 1;

/// A chat message routed between two parties.
///
/// Only `receverId` is interpreted; every other field is carried through to
/// the recipient untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Actor id of the intended recipient.
    #[serde(rename = "receverId")]
    pub recever_id: String,
    /// Remaining message fields (`senderId`, `message`, ...).
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ChatMessage {
    /// Build a message with the conventional `senderId` and `message` fields.
    #[must_use]
    pub fn new(
        sender_id: impl Into<String>,
        recever_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let mut fields = Map::new();
        fields.insert("senderId".to_string(), Value::String(sender_id.into()));
        fields.insert("message".to_string(), Value::String(message.into()));
        Self {
            recever_id: recever_id.into(),
            fields,
        }
    }

    /// Attach an extra pass-through field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn sender_id(&self) -> Option<&str> {
        self.fields.get("senderId").and_then(Value::as_str)
    }

    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.fields.get("message")
    }
}

/// Payload of `add_user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRegistration {
    #[serde(rename = "customerId")]
    pub customer_id: String,
    #[serde(rename = "userInfo", default)]
    pub user_info: Value,
}

/// Payload of `add_seller`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerRegistration {
    #[serde(rename = "sellerId")]
    pub seller_id: String,
    #[serde(rename = "userInfo", default)]
    pub user_info: Value,
}

/// Events sent by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    /// A customer announces itself.
    #[serde(rename = "add_user")]
    AddUser(CustomerRegistration),

    /// A seller announces itself.
    #[serde(rename = "add_seller")]
    AddSeller(SellerRegistration),

    /// The admin announces itself with its profile.
    #[serde(rename = "add_admin")]
    AddAdmin(Value),

    /// Seller writes to a customer.
    #[serde(rename = "send_seller_message")]
    SendSellerMessage(ChatMessage),

    /// Customer writes to a seller.
    #[serde(rename = "send_customer_message")]
    SendCustomerMessage(ChatMessage),

    /// Admin writes to a seller.
    #[serde(rename = "send_message_admin_to_seller")]
    SendMessageAdminToSeller(ChatMessage),

    /// Seller writes to the admin.
    #[serde(rename = "send_message_seller_to_admin")]
    SendMessageSellerToAdmin(ChatMessage),
}

impl ClientEvent {
    /// Wire name of the event.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::AddUser(_) => "add_user",
            ClientEvent::AddSeller(_) => "add_seller",
            ClientEvent::AddAdmin(_) => "add_admin",
            ClientEvent::SendSellerMessage(_) => "send_seller_message",
            ClientEvent::SendCustomerMessage(_) => "send_customer_message",
            ClientEvent::SendMessageAdminToSeller(_) => "send_message_admin_to_seller",
            ClientEvent::SendMessageSellerToAdmin(_) => "send_message_seller_to_admin",
        }
    }

    /// Create an `add_user` event.
    #[must_use]
    pub fn add_user(customer_id: impl Into<String>, user_info: Value) -> Self {
        ClientEvent::AddUser(CustomerRegistration {
            customer_id: customer_id.into(),
            user_info,
        })
    }

    /// Create an `add_seller` event.
    #[must_use]
    pub fn add_seller(seller_id: impl Into<String>, user_info: Value) -> Self {
        ClientEvent::AddSeller(SellerRegistration {
            seller_id: seller_id.into(),
            user_info,
        })
    }
}

/// One entry of the `activeSeller` broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerPresence {
    #[serde(rename = "sellerId")]
    pub seller_id: String,
    #[serde(rename = "socketId")]
    pub socket_id: ConnectionId,
    #[serde(rename = "userInfo")]
    pub user_info: Value,
}

/// One entry of the `activeCustomer` broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerPresence {
    #[serde(rename = "customerId")]
    pub customer_id: String,
    #[serde(rename = "socketId")]
    pub socket_id: ConnectionId,
    #[serde(rename = "userInfo")]
    pub user_info: Value,
}

/// Payload of `activeAdmin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStatus {
    pub status: bool,
}

/// Payload of `connected`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handshake {
    #[serde(rename = "connectionId")]
    pub connection_id: ConnectionId,
    pub version: u8,
}

/// Events sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// First event on every connection.
    #[serde(rename = "connected")]
    Connected(Handshake),

    /// Full seller roster, broadcast to everyone.
    #[serde(rename = "activeSeller")]
    ActiveSeller(Vec<SellerPresence>),

    /// Full customer roster, broadcast to everyone.
    #[serde(rename = "activeCustomer")]
    ActiveCustomer(Vec<CustomerPresence>),

    /// Admin online signal, broadcast to everyone.
    #[serde(rename = "activeAdmin")]
    ActiveAdmin(AdminStatus),

    /// Seller-to-customer chat, delivered to the customer.
    #[serde(rename = "seller_message")]
    SellerMessage(ChatMessage),

    /// Customer-to-seller chat, delivered to the seller.
    #[serde(rename = "customer_message")]
    CustomerMessage(ChatMessage),

    /// Admin-to-seller chat, delivered to the seller.
    #[serde(rename = "receved_admin_message")]
    AdminMessage(ChatMessage),

    /// Seller-to-admin chat, delivered to the admin.
    #[serde(rename = "receved_seller_message")]
    SellerToAdminMessage(ChatMessage),
}

impl ServerEvent {
    /// Wire name of the event.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::Connected(_) => "connected",
            ServerEvent::ActiveSeller(_) => "activeSeller",
            ServerEvent::ActiveCustomer(_) => "activeCustomer",
            ServerEvent::ActiveAdmin(_) => "activeAdmin",
            ServerEvent::SellerMessage(_) => "seller_message",
            ServerEvent::CustomerMessage(_) => "customer_message",
            ServerEvent::AdminMessage(_) => "receved_admin_message",
            ServerEvent::SellerToAdminMessage(_) => "receved_seller_message",
        }
    }

    /// Create the handshake event for a new connection.
    #[must_use]
    pub fn connected(connection_id: ConnectionId) -> Self {
        ServerEvent::Connected(Handshake {
            connection_id,
            version: PROTOCOL_VERSION,
        })
    }

    /// Create an `activeAdmin` event.
    #[must_use]
    pub fn admin_status(status: bool) -> Self {
        ServerEvent::ActiveAdmin(AdminStatus { status })
    }
}
