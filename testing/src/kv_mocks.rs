//! In-memory key-value store for persistence tests
//!
//! [`InMemoryKeyValueStore`] is a `HashMap`-backed [`KeyValueStore`] with
//! switches for simulating read and write failures, and counters for
//! asserting how many writes a flow produced.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Lock poisoning only follows a panicking test

use priorities_core::storage::{KeyValueStore, StorageError, StorageFuture};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory key-value store for fast, deterministic testing.
///
/// Clones share the same underlying data, so a test can hand one clone to the
/// code under test and inspect another.
///
/// # Example
///
/// ```
/// use priorities_testing::InMemoryKeyValueStore;
/// use priorities_core::storage::KeyValueStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryKeyValueStore::new();
/// store.set("priorities_todos", "[]".to_string()).await?;
///
/// assert_eq!(store.raw("priorities_todos").as_deref(), Some("[]"));
/// assert_eq!(store.write_count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryKeyValueStore {
    data: Arc<RwLock<HashMap<String, String>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryKeyValueStore {
    /// Create a new empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one key already written
    ///
    /// Seeding does not count towards [`write_count`](Self::write_count).
    #[must_use]
    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let store = Self::new();
        store
            .data
            .write()
            .unwrap()
            .insert(key.to_string(), value.into());
        store
    }

    /// Make every subsequent `get` fail with `StorageError::Io`
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `set` fail with `StorageError::Io`
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current raw value under `key`, bypassing failure injection
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.data.read().unwrap().get(key).cloned()
    }

    /// Current value under `key` decoded from JSON
    ///
    /// Panics if the value is not valid JSON for `T`.
    #[must_use]
    pub fn json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.raw(key)
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    /// Number of successful `set` calls
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Check if nothing has been stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.read().unwrap().is_empty()
    }

    fn injected(key: &str, op: &str) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            message: format!("injected {op} failure"),
        }
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<String>> {
        Box::pin(async move {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(Self::injected(key, "read"));
            }
            Ok(self.data.read().unwrap().get(key).cloned())
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(Self::injected(key, "write"));
            }
            self.data.write().unwrap().insert(key.to_string(), value);
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }
}
