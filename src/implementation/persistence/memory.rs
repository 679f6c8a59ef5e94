//! In-memory store

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use crate::errors::{PersistenceError, PersistenceResult};

use super::KeyValueStore;

/// Mutex-guarded in-memory store.
///
/// Counts reads, writes and removals so callers can observe persistence
/// traffic. An optional byte quota makes oversized writes fail the way a
/// browser's storage does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    quota:   Option<usize>,
    reads:   AtomicUsize,
    writes:  AtomicUsize,
    removes: AtomicUsize,
}

impl MemoryStore {
    /// Creates an empty store without a quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that rejects writes pushing the total size of
    /// stored values above `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self { quota: Some(bytes), ..Self::default() }
    }

    /// Creates a store holding `value` at `key`.
    #[must_use]
    pub fn seeded(key: &str, value: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.into());
        }
        store
    }

    /// Current value at `key`, without counting a read.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    /// Number of `read` calls.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of successful `write` calls.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of `remove` calls.
    #[must_use]
    pub fn remove_count(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> PersistenceResult<Option<Vec<u8>>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let entries = self.entries.lock().map_err(|_| PersistenceError::LockError)?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &[u8]) -> PersistenceResult<()> {
        let mut entries = self.entries.lock().map_err(|_| PersistenceError::LockError)?;

        if let Some(quota) = self.quota {
            let others: usize =
                entries.iter().filter(|(k, _)| k.as_str() != key).map(|(_, v)| v.len()).sum();
            if others + value.len() > quota {
                return Err(PersistenceError::QuotaExceeded(key.to_string()));
            }
        }

        entries.insert(key.to_string(), value.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: &str) -> PersistenceResult<()> {
        self.removes.fetch_add(1, Ordering::SeqCst);
        let mut entries = self.entries.lock().map_err(|_| PersistenceError::LockError)?;
        entries.remove(key);
        Ok(())
    }
}
