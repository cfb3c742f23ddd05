//! Realtime presence and chat server for the Bazaar marketplace.
//!
//! Customers, sellers, and the admin dashboard keep a WebSocket open to this
//! server. It tracks who is online and relays chat messages between them.

pub mod config;
pub mod handlers;
pub mod hub;
pub mod metrics;

pub use config::Config;
pub use handlers::{build_app, run_server, serve, AppState};
