//! Key-value storage trait and related types.
//!
//! This module defines the abstraction over device-local storage: a flat
//! namespace of string keys, each holding one string value that is replaced
//! wholesale on every write.
//!
//! # Implementations
//!
//! - `FileKeyValueStore` (in the `priorities` crate): one file per key on local disk
//! - `InMemoryKeyValueStore` (in `priorities-testing`): fast, deterministic testing,
//!   with read/write failure injection
//!
//! # Example
//!
//! ```no_run
//! use priorities_core::storage::{KeyValueStore, StorageError};
//!
//! async fn example<S: KeyValueStore>(store: &S) -> Result<(), StorageError> {
//!     store.set("settings", "{}".to_string()).await?;
//!     let value = store.get("settings").await?;
//!     assert_eq!(value.as_deref(), Some("{}"));
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by [`KeyValueStore`] methods.
pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Errors that can occur during storage operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Underlying I/O failed while reading or writing a key.
    #[error("I/O error on key {key}: {message}")]
    Io {
        /// The key being accessed.
        key: String,
        /// Backend-specific failure description.
        message: String,
    },

    /// The key cannot be represented by this backend.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The backend cannot be used at all (e.g. its location is not usable).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous key-value store abstraction.
///
/// Values are opaque strings. Every `set` fully replaces the previous value;
/// there are no partial writes.
///
/// # Dyn Compatibility
///
/// This trait uses explicit `Pin<Box<dyn Future>>` returns instead of `async fn`
/// to enable trait object usage (`Arc<dyn KeyValueStore>`). Effects returned by
/// reducers capture the store and run on spawned tasks.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key was never written.
    ///
    /// # Errors
    ///
    /// - `Io`: the backend failed to read
    /// - `InvalidKey`: the key is not representable by this backend
    /// - `Unavailable`: the backend cannot be used at all
    fn get<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<String>>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// - `Io`: the backend failed to write
    /// - `InvalidKey`: the key is not representable by this backend
    /// - `Unavailable`: the backend cannot be used at all
    fn set<'a>(&'a self, key: &'a str, value: String) -> StorageFuture<'a, ()>;
}
