//! Topic-addressed event publication. No original_source equivalent
//! exists — the Python original has no persistence layer at all
//! (persistence is abstracted out per spec §1 Non-goals). Grounded on
//! the teacher's `sled::Db` pattern in `examples/sled.rs`. The in-memory
//! bus is a synchronous fan-out to already-registered subscribers; the
//! `sled`-backed bus instead persists every event for later replay,
//! since a durable store has no notion of "currently subscribed".

use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::RwLock;

use crate::errors::PersistenceError;

pub trait EventBus {
    fn publish(&self, topic: &str, payload: &[u8]) -> Result<(), PersistenceError>;
}

/// Synchronous in-memory pub-sub: `subscribe` registers a channel that
/// receives every future `publish` on that topic. Events published before a
/// subscription exists are not retained.
#[derive(Default)]
pub struct InMemoryEventBus {
    subscribers: RwLock<HashMap<String, Vec<Sender<Vec<u8>>>>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, topic: &str) -> Result<Receiver<Vec<u8>>, PersistenceError> {
        let (tx, rx) = channel();
        let mut subscribers = self
            .subscribers
            .write()
            .map_err(|_| PersistenceError::new("LOCK_POISONED", "event bus lock poisoned"))?;
        subscribers.entry(topic.to_string()).or_default().push(tx);
        Ok(rx)
    }
}

impl EventBus for InMemoryEventBus {
    fn publish(&self, topic: &str, payload: &[u8]) -> Result<(), PersistenceError> {
        let subscribers = self
            .subscribers
            .read()
            .map_err(|_| PersistenceError::new("LOCK_POISONED", "event bus lock poisoned"))?;
        if let Some(senders) = subscribers.get(topic) {
            for sender in senders {
                // A dropped receiver just means that subscriber stopped
                // listening; it does not fail the publish for others.
                let _ = sender.send(payload.to_vec());
            }
        }
        Ok(())
    }
}

/// Durable event log: every publish appends to a `sled` tree namespaced by
/// topic, so late subscribers can still replay history.
pub struct SledEventBus {
    db: sled::Db,
    tree: sled::Tree,
}

impl SledEventBus {
    pub fn open(db: &sled::Db, tree_name: &str) -> Result<Self, PersistenceError> {
        let tree = db
            .open_tree(tree_name)
            .map_err(|e| PersistenceError::new("SLED_OPEN_FAILED", e.to_string()))?;
        Ok(Self { db: db.clone(), tree })
    }

    pub fn replay(&self, topic: &str) -> Result<Vec<Vec<u8>>, PersistenceError> {
        let prefix = format!("{topic}:");
        let mut result = Vec::new();
        for item in self.tree.scan_prefix(prefix.as_bytes()) {
            let (_, value) = item.map_err(|e| PersistenceError::new("SLED_READ_FAILED", e.to_string()))?;
            result.push(value.to_vec());
        }
        Ok(result)
    }
}

impl EventBus for SledEventBus {
    fn publish(&self, topic: &str, payload: &[u8]) -> Result<(), PersistenceError> {
        let seq = self
            .db
            .generate_id()
            .map_err(|e| PersistenceError::new("SLED_WRITE_FAILED", e.to_string()))?;
        let key = format!("{topic}:{seq:020}");
        self.tree
            .insert(key.as_bytes(), payload)
            .map_err(|e| PersistenceError::new("SLED_WRITE_FAILED", e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn in_memory_bus_delivers_to_subscriber() {
        let bus = InMemoryEventBus::new();
        let rx = bus.subscribe("tx.applied").unwrap();
        bus.publish("tx.applied", b"event-1").unwrap();
        let received = rx.recv_timeout(Duration::from_millis(100)).unwrap();
        assert_eq!(received, b"event-1");
    }

    #[test]
    fn in_memory_bus_ignores_unsubscribed_topics() {
        let bus = InMemoryEventBus::new();
        assert!(bus.publish("nobody.listening", b"event").is_ok());
    }

    #[test]
    fn sled_bus_replays_published_events_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let db = sled::open(dir.path()).unwrap();
        let bus = SledEventBus::open(&db, "events").unwrap();
        bus.publish("tx.applied", b"event-1").unwrap();
        bus.publish("tx.applied", b"event-2").unwrap();
        let replayed = bus.replay("tx.applied").unwrap();
        assert_eq!(replayed, vec![b"event-1".to_vec(), b"event-2".to_vec()]);
    }
}
