//! Key-value persistence for storefront state.
//!
//! # Keys
//!
//! - `cart` - Serialized [`Cart`](crate::models::Cart), written by the cart manager
//! - `orders` - JSON array of [`Order`](crate::models::Order), written at checkout
//!   and on status changes; read by the admin summary as well
//! - `user` - Serialized [`User`](crate::models::User), written by sign-in
//!
//! Values are opaque JSON text. Stores make no attempt at cross-process
//! coordination: two writers doing read-modify-write on the same key will
//! race and the last write wins.

mod file;
mod memory;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage keys used by the storefront.
pub mod keys {
    /// Key for the in-progress cart.
    pub const CART: &str = "cart";

    /// Key for the full order collection.
    pub const ORDERS: &str = "orders";

    /// Key for the signed-in user.
    pub const USER: &str = "user";
}

/// Errors raised by a [`KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key contains characters the backend cannot represent.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Reading or writing the backing medium failed.
    #[error("storage I/O error for key {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// An opaque string key-value store.
///
/// Methods take `&self` so that one store can back both the cart manager and
/// the order workflow at once; implementations supply their own interior
/// mutability.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Errors from typed reads and writes through [`load_json`] / [`save_json`].
#[derive(Debug, Error)]
pub enum RecordError {
    /// The backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The stored value is not a valid record.
    #[error("malformed value under {key:?}: {source}")]
    Decode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The record could not be serialized.
    #[error("failed to encode value for {key:?}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and decode the JSON record stored under `key`.
///
/// # Errors
///
/// Returns [`RecordError::Decode`] if the stored text does not match `T`.
pub fn load_json<T, S>(store: &S, key: &'static str) -> Result<Option<T>, RecordError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        debug!(key, "No stored value");
        return Ok(None);
    };
    debug!(key, bytes = raw.len(), "Loaded stored value");
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| RecordError::Decode { key, source })
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns [`RecordError`] if encoding or the write fails.
pub fn save_json<T, S>(store: &S, key: &'static str, value: &T) -> Result<(), RecordError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| RecordError::Encode { key, source })?;
    store.set(key, &raw)?;
    debug!(key, bytes = raw.len(), "Stored value");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_key() {
        let store = MemoryStore::new();
        let loaded: Option<Vec<u32>> = load_json(&store, keys::ORDERS).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        save_json(&store, keys::ORDERS, &vec![1_u32, 2, 3]).unwrap();
        let loaded: Option<Vec<u32>> = load_json(&store, keys::ORDERS).unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_load_malformed_value() {
        let store = MemoryStore::new();
        store.set(keys::ORDERS, "{not json").unwrap();
        let err = load_json::<Vec<u32>, _>(&store, keys::ORDERS).unwrap_err();
        assert!(matches!(err, RecordError::Decode { key: "orders", .. }));
    }

    #[test]
    fn test_shared_handle_sees_writes() {
        let store = Arc::new(MemoryStore::new());
        let other = Arc::clone(&store);
        store.set(keys::USER, "{}").unwrap();
        assert_eq!(other.get(keys::USER).unwrap().as_deref(), Some("{}"));
    }
}
