//! Domain types for the priority list.
//!
//! A list holds at most a handful of [`Todo`] entries in insertion order.
//! Each entry moves `active → completed → removed` and never back.

use crate::input::TodoText;
use priorities_macros::Action;
use serde::{Deserialize, Serialize};

/// Opaque identifier of a todo entry, stable for its lifetime
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Wrap an identifier string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single entry
///
/// Serialized as `{"id", "text", "completed", "createdAt"}` with `createdAt`
/// in milliseconds since the Unix epoch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// What needs doing
    pub text: String,
    /// Set once when completed; a completed entry is about to be removed
    pub completed: bool,
    /// Creation time, milliseconds since the Unix epoch
    pub created_at: i64,
}

impl Todo {
    /// Creates a new active entry
    #[must_use]
    pub fn new(id: TodoId, text: TodoText, created_at: i64) -> Self {
        Self {
            id,
            text: text.into_inner(),
            completed: false,
            created_at,
        }
    }
}

/// State of the priority list
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoState {
    /// Entries in insertion order
    pub todos: Vec<Todo>,
}

impl TodoState {
    /// Creates an empty list
    #[must_use]
    pub const fn new() -> Self {
        Self { todos: Vec::new() }
    }

    /// Number of entries, completed ones included
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Whether no further entry may be added
    #[must_use]
    pub fn is_at_capacity(&self, capacity: usize) -> bool {
        self.todos.len() >= capacity
    }

    /// Returns an entry by ID
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| &t.id == id)
    }

    /// Checks if an entry exists
    #[must_use]
    pub fn contains(&self, id: &TodoId) -> bool {
        self.get(id).is_some()
    }
}

/// Actions the todo reducer accepts
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    /// Command: read the persisted list once at startup
    #[command]
    Load,

    /// Command: append a new active entry, unless the list is full
    #[command]
    Add {
        /// Already-validated entry text
        text: TodoText,
    },

    /// Command: mark an entry completed and schedule its removal
    #[command]
    Complete {
        /// Entry to complete
        id: TodoId,
    },

    /// Command: remove a completed entry once its delay has elapsed
    #[command]
    Expire {
        /// Entry to remove
        id: TodoId,
    },

    /// Event: the persisted list was read
    #[event]
    Loaded {
        /// Entries as stored
        todos: Vec<Todo>,
    },
}
