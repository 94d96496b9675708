//! Input boundary: turns raw user text into a [`TodoText`].
//!
//! The state manager trusts `TodoText` and never re-validates it.

use crate::config::MAX_TEXT_LEN;
use thiserror::Error;

/// Reasons raw input is not accepted as a new entry
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// Nothing left after trimming
    #[error("Priority text cannot be empty")]
    Empty,
}

/// Trimmed, non-empty entry text of at most [`MAX_TEXT_LEN`] characters
///
/// Only [`TodoText::parse`] builds one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoText(String);

impl TodoText {
    /// Parse raw input the way the entry field does.
    ///
    /// Characters past [`MAX_TEXT_LEN`] are dropped, the remainder is trimmed,
    /// and an empty result is rejected.
    ///
    /// ```
    /// use priorities::input::{InputError, TodoText};
    ///
    /// assert_eq!(TodoText::parse("  Write report ").unwrap().as_str(), "Write report");
    /// assert_eq!(TodoText::parse("   "), Err(InputError::Empty));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Empty`] if the text is blank.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let limited: String = raw.chars().take(MAX_TEXT_LEN).collect();
        let trimmed = limited.trim();
        if trimmed.is_empty() {
            return Err(InputError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take ownership of the text
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for TodoText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
