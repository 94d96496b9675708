//! Persistence adapter: the whole list as one JSON record under one key.
//!
//! Every write is a full snapshot that replaces the previous one. There is no
//! schema version and no migration.

use crate::types::Todo;
use priorities_core::storage::{KeyValueStore, StorageError};
use std::sync::Arc;
use thiserror::Error;

/// Errors from reading or writing the stored list
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The backend failed to read the record
    #[error("Failed to read stored todos: {0}")]
    StorageRead(#[source] StorageError),

    /// The backend failed to write the record
    #[error("Failed to write todos: {0}")]
    StorageWrite(#[source] StorageError),

    /// A record exists but does not decode as a todo list
    #[error("Stored todos are corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// The list could not be encoded
    #[error("Failed to encode todos: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Reads and writes the todo list under a fixed key
#[derive(Clone)]
pub struct TodoRepository {
    store: Arc<dyn KeyValueStore>,
    key: Arc<str>,
}

impl TodoRepository {
    /// Creates a repository storing under `key`
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The storage key in use
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored list.
    ///
    /// Returns `Ok(None)` if nothing was ever written.
    ///
    /// # Errors
    ///
    /// - [`PersistenceError::StorageRead`] if the backend fails
    /// - [`PersistenceError::Corrupt`] if the record does not decode
    pub async fn read_all(&self) -> Result<Option<Vec<Todo>>, PersistenceError> {
        let Some(raw) = self
            .store
            .get(&self.key)
            .await
            .map_err(PersistenceError::StorageRead)?
        else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(PersistenceError::Corrupt)
    }

    /// Overwrite the stored list with `todos`.
    ///
    /// # Errors
    ///
    /// - [`PersistenceError::Encode`] if the list cannot be serialized
    /// - [`PersistenceError::StorageWrite`] if the backend fails
    pub async fn write_all(&self, todos: &[Todo]) -> Result<(), PersistenceError> {
        let raw = serde_json::to_string(todos).map_err(PersistenceError::Encode)?;
        self.store
            .set(&self.key, raw)
            .await
            .map_err(PersistenceError::StorageWrite)
    }
}

impl std::fmt::Debug for TodoRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoRepository")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
