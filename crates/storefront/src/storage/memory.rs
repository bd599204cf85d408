//! In-memory store.
//!
//! Uses `DashMap` so a cloned handle shares the same entries. Nothing
//! survives the process; intended for tests and throwaway sessions.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::trace;

use super::{KeyValueStore, StorageError};

/// In-memory [`KeyValueStore`].
///
/// Cloning yields another handle onto the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self.entries.get(key).map(|entry| entry.value().clone());
        trace!(key, hit = value.is_some(), "MemoryStore get");
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        trace!(key, "MemoryStore set");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        trace!(key, "MemoryStore remove");
        Ok(())
    }
}
