//! Rosters of connected actors.
//!
//! A roster holds one record per actor id, in registration order, and is
//! indexed both by actor id (for routing) and by connection id (for
//! disconnect cleanup).

use bazaar_protocol::{ConnectionId, CustomerPresence, SellerPresence};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// Stable logical identity of a customer or seller.
pub type ActorId = String;

/// A registered actor and the connection it was registered from.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionRecord {
    /// Stable actor identity.
    pub actor_id: ActorId,
    /// Connection the actor registered from.
    pub connection_id: ConnectionId,
    /// Client-supplied display metadata, stored verbatim.
    pub profile: serde_json::Value,
}

impl ConnectionRecord {
    #[must_use]
    pub fn new(
        actor_id: impl Into<ActorId>,
        connection_id: ConnectionId,
        profile: serde_json::Value,
    ) -> Self {
        Self {
            actor_id: actor_id.into(),
            connection_id,
            profile,
        }
    }

    /// Wire form for the `activeSeller` broadcast.
    #[must_use]
    pub fn to_seller_presence(&self) -> SellerPresence {
        SellerPresence {
            seller_id: self.actor_id.clone(),
            socket_id: self.connection_id.clone(),
            user_info: self.profile.clone(),
        }
    }

    /// Wire form for the `activeCustomer` broadcast.
    #[must_use]
    pub fn to_customer_presence(&self) -> CustomerPresence {
        CustomerPresence {
            customer_id: self.actor_id.clone(),
            socket_id: self.connection_id.clone(),
            user_info: self.profile.clone(),
        }
    }
}

/// Ordered set of connected actors of one class.
#[derive(Debug, Default)]
pub struct Roster {
    /// Records keyed by insertion sequence, which keeps registration order.
    records: BTreeMap<u64, ConnectionRecord>,
    /// Actor id -> sequence.
    by_actor: HashMap<ActorId, u64>,
    /// Connection id -> sequences registered from that connection.
    by_connection: HashMap<ConnectionId, HashSet<u64>>,
    next_seq: u64,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn contains(&self, actor_id: &str) -> bool {
        self.by_actor.contains_key(actor_id)
    }

    /// Look up an actor's record.
    #[must_use]
    pub fn get(&self, actor_id: &str) -> Option<&ConnectionRecord> {
        self.by_actor
            .get(actor_id)
            .and_then(|seq| self.records.get(seq))
    }

    /// The connection an actor is currently reachable at.
    #[must_use]
    pub fn connection_of(&self, actor_id: &str) -> Option<&ConnectionId> {
        self.get(actor_id).map(|record| &record.connection_id)
    }

    /// Records in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ConnectionRecord> {
        self.records.values()
    }

    /// Insert a record unless its actor is already present.
    ///
    /// Returns `true` if the record was added. An existing record is left
    /// untouched, including its connection id.
    pub fn insert(&mut self, record: ConnectionRecord) -> bool {
        if self.by_actor.contains_key(&record.actor_id) {
            debug!(actor = %record.actor_id, "Roster: actor already present");
            return false;
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        self.by_actor.insert(record.actor_id.clone(), seq);
        self.by_connection
            .entry(record.connection_id.clone())
            .or_default()
            .insert(seq);
        debug!(actor = %record.actor_id, connection = %record.connection_id, "Roster: actor joined");
        self.records.insert(seq, record);

        true
    }

    /// Insert a record, or move an existing actor onto the record's
    /// connection and profile while keeping its position.
    ///
    /// Returns `true` if the actor was new.
    pub fn upsert(&mut self, record: ConnectionRecord) -> bool {
        let Some(&seq) = self.by_actor.get(&record.actor_id) else {
            return self.insert(record);
        };

        let Some(previous) = self.records.get(&seq).map(|r| r.connection_id.clone()) else {
            return false;
        };

        if previous != record.connection_id {
            self.unindex_connection(&previous, seq);
            self.by_connection
                .entry(record.connection_id.clone())
                .or_default()
                .insert(seq);
            debug!(
                actor = %record.actor_id,
                from = %previous,
                to = %record.connection_id,
                "Roster: actor rebound"
            );
        }
        self.records.insert(seq, record);

        false
    }

    /// Remove every record registered from a connection.
    ///
    /// Returns the removed records in registration order.
    pub fn remove_connection(&mut self, connection_id: &ConnectionId) -> Vec<ConnectionRecord> {
        let Some(seqs) = self.by_connection.remove(connection_id) else {
            return Vec::new();
        };

        let mut seqs: Vec<u64> = seqs.into_iter().collect();
        seqs.sort_unstable();

        let removed: Vec<ConnectionRecord> = seqs
            .into_iter()
            .filter_map(|seq| self.records.remove(&seq))
            .collect();

        for record in &removed {
            self.by_actor.remove(&record.actor_id);
            debug!(actor = %record.actor_id, connection = %connection_id, "Roster: actor left");
        }

        removed
    }

    /// Sellers wire snapshot.
    #[must_use]
    pub fn seller_snapshot(&self) -> Vec<SellerPresence> {
        self.iter().map(ConnectionRecord::to_seller_presence).collect()
    }

    /// Customers wire snapshot.
    #[must_use]
    pub fn customer_snapshot(&self) -> Vec<CustomerPresence> {
        self.iter()
            .map(ConnectionRecord::to_customer_presence)
            .collect()
    }

    fn unindex_connection(&mut self, connection_id: &ConnectionId, seq: u64) {
        if let Some(seqs) = self.by_connection.get_mut(connection_id) {
            seqs.remove(&seq);
            if seqs.is_empty() {
                self.by_connection.remove(connection_id);
            }
        }
    }
}
