//! # bazaar-core
//!
//! Presence tracking and point-to-point message routing for the Bazaar
//! marketplace.
//!
//! This crate provides the in-memory state behind the realtime layer:
//!
//! - **Roster** - Connected customers or sellers, keyed by actor id
//! - **AdminSession** - The single connected admin
//! - **Outboxes** - Per-connection delivery queues
//! - **PresenceRouter** - Registration, broadcasts, and chat routing
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌────────────────┐     ┌─────────────┐
//! │  Transport  │────▶│ PresenceRouter │────▶│   Outboxes  │
//! └─────────────┘     └────────────────┘     └─────────────┘
//!                        │          │
//!                        ▼          ▼
//!                 ┌──────────┐ ┌──────────────┐
//!                 │  Roster  │ │ AdminSession │
//!                 └──────────┘ └──────────────┘
//! ```
//!
//! The router is deliberately synchronous and `&mut self`: the transport
//! feeds it one event at a time, so no locking is involved.

pub mod admin;
pub mod outbox;
pub mod roster;
pub mod router;

pub use admin::AdminSession;
pub use outbox::{Outbox, OutboxReceiver, Outboxes};
pub use roster::{ActorId, ConnectionRecord, Roster};
pub use router::{
    MessageRoute, PresenceRouter, ReregistrationPolicy, RouterConfig, RouterError, RouterStats,
};
