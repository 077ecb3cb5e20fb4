//! Content-addressed attestation persistence. No original_source
//! equivalent exists — the Python original has no persistence layer at
//! all (`attestor/store/` is not a package in the retrieved source;
//! persistence is abstracted out per spec §1 Non-goals). Grounded on the
//! teacher's own hash-as-key `sled::Db` insert/get shape in `examples/sled.rs`.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::errors::PersistenceError;

/// Stores attestation payloads keyed by `attestation_id`. Callers serialize
/// the attestation themselves (canonical encoding is one-way — see
/// `attestation::canonical` — so persistence uses a separate, decodable
/// wire format chosen by the caller) and address it by the id computed at
/// construction time.
pub trait AttestationStore {
    fn put(&self, attestation_id: &str, payload: &[u8]) -> Result<(), PersistenceError>;
    fn get(&self, attestation_id: &str) -> Result<Option<Vec<u8>>, PersistenceError>;
    fn contains(&self, attestation_id: &str) -> Result<bool, PersistenceError>;
}

/// Process-local store, useful for tests and single-process deployments.
#[derive(Debug, Default)]
pub struct InMemoryAttestationStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryAttestationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttestationStore for InMemoryAttestationStore {
    fn put(&self, attestation_id: &str, payload: &[u8]) -> Result<(), PersistenceError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| PersistenceError::new("LOCK_POISONED", "attestation store lock poisoned"))?;
        entries.insert(attestation_id.to_string(), payload.to_vec());
        Ok(())
    }

    fn get(&self, attestation_id: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| PersistenceError::new("LOCK_POISONED", "attestation store lock poisoned"))?;
        Ok(entries.get(attestation_id).cloned())
    }

    fn contains(&self, attestation_id: &str) -> Result<bool, PersistenceError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| PersistenceError::new("LOCK_POISONED", "attestation store lock poisoned"))?;
        Ok(entries.contains_key(attestation_id))
    }
}

/// Durable store backed by a `sled` tree, one key per `attestation_id`.
pub struct SledAttestationStore {
    tree: sled::Tree,
}

impl SledAttestationStore {
    pub fn open(db: &sled::Db, tree_name: &str) -> Result<Self, PersistenceError> {
        let tree = db
            .open_tree(tree_name)
            .map_err(|e| PersistenceError::new("SLED_OPEN_FAILED", e.to_string()))?;
        Ok(Self { tree })
    }
}

impl AttestationStore for SledAttestationStore {
    fn put(&self, attestation_id: &str, payload: &[u8]) -> Result<(), PersistenceError> {
        self.tree
            .insert(attestation_id.as_bytes(), payload)
            .map_err(|e| PersistenceError::new("SLED_WRITE_FAILED", e.to_string()))?;
        Ok(())
    }

    fn get(&self, attestation_id: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        self.tree
            .get(attestation_id.as_bytes())
            .map(|maybe| maybe.map(|v| v.to_vec()))
            .map_err(|e| PersistenceError::new("SLED_READ_FAILED", e.to_string()))
    }

    fn contains(&self, attestation_id: &str) -> Result<bool, PersistenceError> {
        self.tree
            .contains_key(attestation_id.as_bytes())
            .map_err(|e| PersistenceError::new("SLED_READ_FAILED", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_round_trips_a_payload() {
        let store = InMemoryAttestationStore::new();
        store.put("att-1", b"payload").unwrap();
        assert_eq!(store.get("att-1").unwrap(), Some(b"payload".to_vec()));
        assert!(store.contains("att-1").unwrap());
    }

    #[test]
    fn in_memory_missing_key_returns_none() {
        let store = InMemoryAttestationStore::new();
        assert_eq!(store.get("missing").unwrap(), None);
        assert!(!store.contains("missing").unwrap());
    }

    #[test]
    fn sled_store_round_trips_a_payload() {
        let dir = tempfile::tempdir().unwrap();
        let db = sled::open(dir.path()).unwrap();
        let store = SledAttestationStore::open(&db, "attestations").unwrap();
        store.put("att-1", b"payload").unwrap();
        assert_eq!(store.get("att-1").unwrap(), Some(b"payload".to_vec()));
    }
}
