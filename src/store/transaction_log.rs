//! Append-only transaction log. No original_source equivalent exists —
//! the Python original has no persistence layer at all (persistence is
//! abstracted out per spec §1 Non-goals). Grounded on the teacher's
//! `sled::Db` insert/get pattern in `examples/sled.rs`.

use std::sync::RwLock;

use crate::errors::PersistenceError;

/// An append-only, replayable record of executed transactions, keyed by
/// insertion order. Entries are caller-serialized bytes, same rationale as
/// `AttestationStore`.
pub trait TransactionLog {
    fn append(&self, tx_id: &str, payload: &[u8]) -> Result<(), PersistenceError>;
    fn entries(&self) -> Result<Vec<(String, Vec<u8>)>, PersistenceError>;
    fn len(&self) -> Result<usize, PersistenceError>;
}

#[derive(Debug, Default)]
pub struct InMemoryTransactionLog {
    entries: RwLock<Vec<(String, Vec<u8>)>>,
}

impl InMemoryTransactionLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionLog for InMemoryTransactionLog {
    fn append(&self, tx_id: &str, payload: &[u8]) -> Result<(), PersistenceError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| PersistenceError::new("LOCK_POISONED", "transaction log lock poisoned"))?;
        entries.push((tx_id.to_string(), payload.to_vec()));
        Ok(())
    }

    fn entries(&self) -> Result<Vec<(String, Vec<u8>)>, PersistenceError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| PersistenceError::new("LOCK_POISONED", "transaction log lock poisoned"))?;
        Ok(entries.clone())
    }

    fn len(&self) -> Result<usize, PersistenceError> {
        Ok(self.entries()?.len())
    }
}

/// Durable log backed by a `sled` tree. Each entry's key is a big-endian
/// sequence counter so iteration order matches append order.
pub struct SledTransactionLog {
    db: sled::Db,
    tree: sled::Tree,
}

impl SledTransactionLog {
    pub fn open(db: &sled::Db, tree_name: &str) -> Result<Self, PersistenceError> {
        let tree = db
            .open_tree(tree_name)
            .map_err(|e| PersistenceError::new("SLED_OPEN_FAILED", e.to_string()))?;
        Ok(Self { db: db.clone(), tree })
    }
}

impl TransactionLog for SledTransactionLog {
    fn append(&self, tx_id: &str, payload: &[u8]) -> Result<(), PersistenceError> {
        let seq = self
            .db
            .generate_id()
            .map_err(|e| PersistenceError::new("SLED_WRITE_FAILED", e.to_string()))?;
        let mut key = seq.to_be_bytes().to_vec();
        key.extend_from_slice(tx_id.as_bytes());
        self.tree
            .insert(key, payload)
            .map_err(|e| PersistenceError::new("SLED_WRITE_FAILED", e.to_string()))?;
        Ok(())
    }

    fn entries(&self) -> Result<Vec<(String, Vec<u8>)>, PersistenceError> {
        let mut result = Vec::new();
        for item in self.tree.iter() {
            let (key, value) = item.map_err(|e| PersistenceError::new("SLED_READ_FAILED", e.to_string()))?;
            let tx_id = String::from_utf8_lossy(&key[8..]).to_string();
            result.push((tx_id, value.to_vec()));
        }
        Ok(result)
    }

    fn len(&self) -> Result<usize, PersistenceError> {
        Ok(self.tree.len())
    }
}
