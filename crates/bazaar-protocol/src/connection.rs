//! Connection identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Disambiguates ids generated within the same clock tick.
static CONNECTION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Identity of one live transport connection.
///
/// A new id is issued on every (re)connect, so it must never be used as the
/// identity of a customer or seller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Wrap an existing connection id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh, process-unique connection id.
    #[must_use]
    pub fn generate() -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        let counter = CONNECTION_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(format!("conn_{:x}_{:x}", timestamp, counter))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ConnectionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ConnectionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ConnectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let id1 = ConnectionId::generate();
        let id2 = ConnectionId::generate();
        assert_ne!(id1, id2);
        assert!(id1.as_str().starts_with("conn_"));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id: ConnectionId = "sockA".into();
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""sockA""#);
        assert_eq!(id.to_string(), "sockA");
    }
}
