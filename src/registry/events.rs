//! Event log — hash-chained journal of registry events
//!
//! Every Birth and Transfer the registry emits is appended here. Each
//! record commits to the previous head, so rewriting history anywhere in
//! the log breaks `verify_chain`.

use crate::token::{Address, KittyId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Ownership change of a single kitty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    pub id: KittyId,
}

/// Events emitted by the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// A kitty came into existence
    Birth {
        owner: Address,
        id: KittyId,
        mum_id: KittyId,
        dad_id: KittyId,
        genes: u64,
    },
    /// A kitty changed hands
    Transfer(TransferEvent),
}

impl RegistryEvent {
    pub fn kitty_id(&self) -> KittyId {
        match self {
            RegistryEvent::Birth { id, .. } => *id,
            RegistryEvent::Transfer(t) => t.id,
        }
    }

    fn digest_into(&self, hasher: &mut Sha256) {
        match self {
            RegistryEvent::Birth { owner, id, mum_id, dad_id, genes } => {
                hasher.update(b"birth");
                hasher.update(owner.as_bytes());
                hasher.update(id.to_le_bytes());
                hasher.update(mum_id.to_le_bytes());
                hasher.update(dad_id.to_le_bytes());
                hasher.update(genes.to_le_bytes());
            }
            RegistryEvent::Transfer(t) => {
                hasher.update(b"transfer");
                hasher.update(t.from.as_bytes());
                hasher.update(t.to.as_bytes());
                hasher.update(t.id.to_le_bytes());
            }
        }
    }
}

/// A journaled event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the log, starting at 0
    pub seq: u64,
    pub event: RegistryEvent,
    pub timestamp: DateTime<Utc>,
    /// Chain hash over the previous head and this event
    pub hash: String,
}

/// Append-only event journal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLog {
    records: Vec<EventRecord>,
    head_hash: String,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            head_hash: Self::genesis_hash(),
        }
    }

    /// Append an event and return its record
    pub fn append(&mut self, event: RegistryEvent) -> &EventRecord {
        let seq = self.records.len() as u64;
        let hash = Self::chain_hash(&self.head_hash, seq, &event);
        self.head_hash = hash.clone();
        self.records.push(EventRecord {
            seq,
            event,
            timestamp: Utc::now(),
            hash,
        });
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn head_hash(&self) -> &str {
        &self.head_hash
    }

    pub fn last(&self) -> Option<&EventRecord> {
        self.records.last()
    }

    /// All records touching one kitty, oldest first
    pub fn for_kitty(&self, id: KittyId) -> Vec<&EventRecord> {
        self.records.iter().filter(|r| r.event.kitty_id() == id).collect()
    }

    /// Transfer history of one kitty, oldest first
    pub fn transfers_of(&self, id: KittyId) -> Vec<TransferEvent> {
        self.records
            .iter()
            .filter_map(|r| match r.event {
                RegistryEvent::Transfer(t) if t.id == id => Some(t),
                _ => None,
            })
            .collect()
    }

    pub fn transfer_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.event, RegistryEvent::Transfer(_)))
            .count()
    }

    /// Recompute every link and compare with the stored hashes
    pub fn verify_chain(&self) -> bool {
        let mut prev = Self::genesis_hash();
        for (i, record) in self.records.iter().enumerate() {
            if record.seq != i as u64 {
                return false;
            }
            let expected = Self::chain_hash(&prev, record.seq, &record.event);
            if expected != record.hash {
                return false;
            }
            prev = expected;
        }
        prev == self.head_hash
    }

    fn genesis_hash() -> String {
        hex::encode(Sha256::digest(b"genesis"))
    }

    fn chain_hash(prev_hash: &str, seq: u64, event: &RegistryEvent) -> String {
        let mut hasher = Sha256::new();
        hasher.update(prev_hash.as_bytes());
        hasher.update(seq.to_le_bytes());
        event.digest_into(&mut hasher);
        hex::encode(hasher.finalize())
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(id: KittyId) -> RegistryEvent {
        RegistryEvent::Transfer(TransferEvent {
            from: Address::derive("a"),
            to: Address::derive("b"),
            id,
        })
    }

    #[test]
    fn test_empty_log_verifies() {
        let log = EventLog::new();
        assert!(log.is_empty());
        assert!(log.verify_chain());
    }

    #[test]
    fn test_append_moves_head() {
        let mut log = EventLog::new();
        let genesis = log.head_hash().to_string();
        let record = log.append(transfer(1)).clone();
        assert_eq!(record.seq, 0);
        assert_ne!(log.head_hash(), genesis);
        assert_eq!(log.head_hash(), record.hash);
        assert!(log.verify_chain());
    }

    #[test]
    fn test_tampering_is_detected() {
        let mut log = EventLog::new();
        for id in 1..=5 {
            log.append(transfer(id));
        }
        assert!(log.verify_chain());

        log.records[2].event = transfer(99);
        assert!(!log.verify_chain());
    }

    #[test]
    fn test_filters() {
        let mut log = EventLog::new();
        log.append(RegistryEvent::Birth {
            owner: Address::derive("a"),
            id: 1,
            mum_id: 0,
            dad_id: 0,
            genes: 7,
        });
        log.append(transfer(1));
        log.append(transfer(2));

        assert_eq!(log.for_kitty(1).len(), 2);
        assert_eq!(log.transfers_of(1).len(), 1);
        assert_eq!(log.transfers_of(2)[0].id, 2);
        assert_eq!(log.transfer_count(), 2);
    }
}
