//! The connected admin session.

use bazaar_protocol::ConnectionId;
use serde_json::{Map, Value};

/// Profile fields that are never kept in memory.
const REDACTED_FIELDS: &[&str] = &["email"];

/// The single admin currently connected to the process.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminSession {
    connection_id: ConnectionId,
    profile: Map<String, Value>,
}

impl AdminSession {
    /// Create a session, dropping personal fields from the profile.
    #[must_use]
    pub fn new(connection_id: ConnectionId, mut profile: Map<String, Value>) -> Self {
        for field in REDACTED_FIELDS {
            profile.remove(*field);
        }
        Self {
            connection_id,
            profile,
        }
    }

    #[must_use]
    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }

    #[must_use]
    pub fn profile(&self) -> &Map<String, Value> {
        &self.profile
    }
}
