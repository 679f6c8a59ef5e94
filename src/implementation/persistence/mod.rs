//! # Persistence
//!
//! Durable key-value byte stores backing the cart, and a typed JSON helper
//! on top of them.

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::errors::PersistenceResult;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;


/// A durable key-value byte store.
///
/// Writes overwrite the whole value at a key. There is no locking across
/// processes; concurrent writers to the same key are last-writer-wins.
pub trait KeyValueStore: Debug + Send + Sync {
    /// Reads the value at `key`, `None` when absent.
    fn read(&self, key: &str) -> PersistenceResult<Option<Vec<u8>>>;

    /// Replaces the value at `key`.
    fn write(&self, key: &str, value: &[u8]) -> PersistenceResult<()>;

    /// Deletes the value at `key`. Deleting an absent key succeeds.
    fn remove(&self, key: &str) -> PersistenceResult<()>;
}

/// Typed JSON access to a [`KeyValueStore`].
#[derive(Debug, Clone, Copy)]
pub struct JsonStorage<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> JsonStorage<'a> {
    /// Wraps a store.
    #[must_use]
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Reads and decodes the value at `key`.
    ///
    /// Read and decode failures are logged and reported as absent.
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match self.store.read(key) {
            Ok(bytes) => bytes?,
            Err(err) => {
                warn!(key, error = %err, "failed to read from storage");
                return None;
            },
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %err, "stored value is not valid JSON");
                None
            },
        }
    }

    /// Reads the value at `key`, or `default` when absent or unreadable.
    #[must_use]
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Encodes and writes `value` at `key`.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> PersistenceResult<()> {
        let bytes = serde_json::to_vec(value)?;
        self.store.write(key, &bytes)
    }

    /// Deletes the value at `key`.
    pub fn remove(&self, key: &str) -> PersistenceResult<()> {
        self.store.remove(key)
    }
}
