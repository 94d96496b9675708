//! Tunables for the priority list.

use std::time::Duration;

/// Maximum number of entries the list may hold
pub const DEFAULT_CAPACITY: usize = 5;

/// How long a completed entry stays visible before it is removed
pub const DEFAULT_EXPIRY_DELAY: Duration = Duration::from_millis(1000);

/// Key the whole list is stored under
pub const STORAGE_KEY: &str = "priorities_todos";

/// Maximum number of characters accepted for one entry's text
pub const MAX_TEXT_LEN: usize = 100;

/// Configuration for the todo state manager
///
/// # Example
///
/// ```
/// use priorities::config::PrioritiesConfig;
/// use std::time::Duration;
///
/// let config = PrioritiesConfig::default()
///     .with_expiry_delay(Duration::from_millis(250))
///     .with_storage_key("scratch_todos");
///
/// assert_eq!(config.capacity, 5);
/// assert_eq!(config.storage_key, "scratch_todos");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrioritiesConfig {
    /// Hard cap on list length; adds beyond it are rejected, never evicting
    pub capacity: usize,
    /// Delay between completing an entry and removing it
    pub expiry_delay: Duration,
    /// Storage key the serialized list lives under
    pub storage_key: String,
}

impl PrioritiesConfig {
    /// Set the capacity
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the expiry delay
    #[must_use]
    pub fn with_expiry_delay(mut self, delay: Duration) -> Self {
        self.expiry_delay = delay;
        self
    }

    /// Set the storage key
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}

impl Default for PrioritiesConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            expiry_delay: DEFAULT_EXPIRY_DELAY,
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}
