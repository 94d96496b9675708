//! What a presentation layer renders: the list plus derived counters.

use crate::types::{Todo, TodoState};
use std::fmt;

/// Prompt shown when the list is empty
pub const EMPTY_PROMPT: &str = "What are your top priorities today?";

/// Snapshot of the list for rendering
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrioritiesView {
    /// Entries in insertion order
    pub todos: Vec<Todo>,
    /// Number of entries
    pub count: usize,
    /// Maximum number of entries
    pub capacity: usize,
    /// `count >= capacity`; input should be disabled
    pub is_at_capacity: bool,
}

impl PrioritiesView {
    /// Derive the view from state
    #[must_use]
    pub fn from_state(state: &TodoState, capacity: usize) -> Self {
        Self {
            todos: state.todos.clone(),
            count: state.count(),
            capacity,
            is_at_capacity: state.is_at_capacity(capacity),
        }
    }

    /// Header line, e.g. `3/5 priorities`
    #[must_use]
    pub fn header(&self) -> String {
        format!("{}/{} priorities", self.count, self.capacity)
    }

    /// Entry at a 1-based position, as numbered on screen
    #[must_use]
    pub fn nth(&self, position: usize) -> Option<&Todo> {
        position.checked_sub(1).and_then(|i| self.todos.get(i))
    }
}

impl fmt::Display for PrioritiesView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Priorities  ({})", self.header())?;
        if self.todos.is_empty() {
            return writeln!(f, "  {EMPTY_PROMPT}");
        }
        for (i, todo) in self.todos.iter().enumerate() {
            let mark = if todo.completed { "x" } else { " " };
            writeln!(f, "  {}. [{mark}] {}", i + 1, todo.text)?;
        }
        Ok(())
    }
}
