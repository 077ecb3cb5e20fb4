//! Key-value snapshot storage for position/lifecycle state. No
//! original_source equivalent exists — the Python original has no
//! persistence layer at all (persistence is abstracted out per spec §1
//! Non-goals). Grounded on the teacher's `sled::Db` insert/get pattern in
//! `examples/sled.rs`.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::errors::PersistenceError;

pub trait StateStore {
    fn put(&self, key: &str, payload: &[u8]) -> Result<(), PersistenceError>;
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError>;
    fn delete(&self, key: &str) -> Result<(), PersistenceError>;
}

#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for InMemoryStateStore {
    fn put(&self, key: &str, payload: &[u8]) -> Result<(), PersistenceError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| PersistenceError::new("LOCK_POISONED", "state store lock poisoned"))?;
        entries.insert(key.to_string(), payload.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| PersistenceError::new("LOCK_POISONED", "state store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<(), PersistenceError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| PersistenceError::new("LOCK_POISONED", "state store lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}

pub struct SledStateStore {
    tree: sled::Tree,
}

impl SledStateStore {
    pub fn open(db: &sled::Db, tree_name: &str) -> Result<Self, PersistenceError> {
        let tree = db
            .open_tree(tree_name)
            .map_err(|e| PersistenceError::new("SLED_OPEN_FAILED", e.to_string()))?;
        Ok(Self { tree })
    }
}

impl StateStore for SledStateStore {
    fn put(&self, key: &str, payload: &[u8]) -> Result<(), PersistenceError> {
        self.tree
            .insert(key.as_bytes(), payload)
            .map_err(|e| PersistenceError::new("SLED_WRITE_FAILED", e.to_string()))?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        self.tree
            .get(key.as_bytes())
            .map(|maybe| maybe.map(|v| v.to_vec()))
            .map_err(|e| PersistenceError::new("SLED_READ_FAILED", e.to_string()))
    }

    fn delete(&self, key: &str) -> Result<(), PersistenceError> {
        self.tree
            .remove(key.as_bytes())
            .map_err(|e| PersistenceError::new("SLED_WRITE_FAILED", e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_store_supports_put_get_delete() {
        let store = InMemoryStateStore::new();
        store.put("pos-1", b"state").unwrap();
        assert_eq!(store.get("pos-1").unwrap(), Some(b"state".to_vec()));
        store.delete("pos-1").unwrap();
        assert_eq!(store.get("pos-1").unwrap(), None);
    }

    #[test]
    fn sled_store_supports_put_get_delete() {
        let dir = tempfile::tempdir().unwrap();
        let db = sled::open(dir.path()).unwrap();
        let store = SledStateStore::open(&db, "state").unwrap();
        store.put("pos-1", b"state").unwrap();
        assert_eq!(store.get("pos-1").unwrap(), Some(b"state".to_vec()));
        store.delete("pos-1").unwrap();
        assert_eq!(store.get("pos-1").unwrap(), None);
    }
}
