//! Key-value storage for snapshots.

use rustc_hash::FxHashMap;

use super::snapshot::Snapshot;
use crate::core::{GameState, Result};

/// Key under which the roster snapshot is stored.
pub const STORAGE_KEY: &str = "player-store";

/// Blob storage provided by the host.
pub trait KeyValueStore {
    /// Read the blob under `key`.
    fn load(&self, key: &str) -> std::io::Result<Option<Vec<u8>>>;

    /// Write `value` under `key`, replacing any previous blob.
    fn save(&mut self, key: &str, value: Vec<u8>) -> std::io::Result<()>;

    /// Delete the blob under `key`. Returns whether one existed.
    fn remove(&mut self, key: &str) -> std::io::Result<bool>;
}

/// In-process store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> std::io::Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: Vec<u8>) -> std::io::Result<()> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> std::io::Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }
}

/// Store `state`'s snapshot under [`STORAGE_KEY`].
pub fn save_state(store: &mut impl KeyValueStore, state: &GameState) -> Result<()> {
    let bytes = state.snapshot().encode()?;
    tracing::debug!(bytes = bytes.len(), "saving roster snapshot");
    store.save(STORAGE_KEY, bytes)?;
    Ok(())
}

/// Read and migrate the snapshot under [`STORAGE_KEY`], if any.
pub fn load_snapshot(store: &impl KeyValueStore) -> Result<Option<Snapshot>> {
    store
        .load(STORAGE_KEY)?
        .map(|bytes| Snapshot::decode(&bytes))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();

        assert_eq!(store.load("k").unwrap(), None);
        store.save("k", vec![1, 2]).unwrap();
        assert_eq!(store.load("k").unwrap(), Some(vec![1, 2]));
        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
    }

    #[test]
    fn test_load_missing_snapshot() {
        let store = MemoryStore::new();
        assert!(load_snapshot(&store).unwrap().is_none());
    }
}
