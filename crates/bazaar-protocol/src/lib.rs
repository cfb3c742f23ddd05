//! # bazaar-protocol
//!
//! Wire protocol for the Bazaar marketplace realtime layer.
//!
//! Clients talk to the server with named events, each carrying a single
//! payload. The same event types travel over two framings:
//!
//! - **Text frames** - one JSON document per frame
//! - **Binary frames** - length-prefixed named MessagePack
//!
//! ## Inbound events
//!
//! - `add_user` / `add_seller` / `add_admin` - Roster registration
//! - `send_*_message` - Point-to-point chat routed by `receverId`
//!
//! ## Outbound events
//!
//! - `activeSeller` / `activeCustomer` / `activeAdmin` - Roster broadcasts
//! - `seller_message`, `customer_message`, `receved_*_message` - Unicast chat
//!
//! ## Example
//!
//! ```rust
//! use bazaar_protocol::{codec, ClientEvent};
//!
//! let text = r#"{"event":"add_user","data":{"customerId":"c1","userInfo":{"name":"Alice"}}}"#;
//! let event: ClientEvent = codec::decode_json(text).unwrap();
//! assert_eq!(event.name(), "add_user");
//! ```

pub mod codec;
pub mod connection;
pub mod events;

pub use codec::{FrameFormat, ProtocolError};
pub use connection::ConnectionId;
pub use events::{
    AdminStatus, ChatMessage, ClientEvent, CustomerPresence, CustomerRegistration, Handshake,
    SellerPresence, SellerRegistration, ServerEvent, PROTOCOL_VERSION,
};
