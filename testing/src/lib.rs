//! # Priorities Testing
//!
//! Testing utilities and helpers for the Priorities workspace.
//!
//! This crate provides:
//! - Mock implementations of Environment traits (clock, id generator)
//! - An in-memory key-value store with failure injection
//! - A Given-When-Then harness for reducers
//!
//! ## Example
//!
//! ```ignore
//! use priorities_testing::{test_clock, InMemoryKeyValueStore, SequentialIds};
//!
//! #[tokio::test]
//! async fn adds_are_persisted() {
//!     let storage = InMemoryKeyValueStore::new();
//!     let env = environment(test_clock(), SequentialIds::new("todo"), storage.clone());
//!     let manager = TodoManager::new(env);
//!
//!     manager.load().await?;
//!     manager.add(TodoText::parse("Write report")?).await?;
//!     assert_eq!(storage.write_count(), 1);
//! }
//! ```

use chrono::{DateTime, Utc};
use priorities_core::environment::{Clock, IdGenerator};

mod kv_mocks;
mod reducer_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use priorities_testing::mocks::FixedClock;
    /// use priorities_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default())
    }

    /// Predictable id generator: `prefix-1`, `prefix-2`, ...
    ///
    /// ```
    /// use priorities_testing::mocks::SequentialIds;
    /// use priorities_core::environment::IdGenerator;
    ///
    /// let ids = SequentialIds::new("todo");
    /// assert_eq!(ids.next_id(), "todo-1");
    /// assert_eq!(ids.next_id(), "todo-2");
    /// ```
    #[derive(Debug)]
    pub struct SequentialIds {
        prefix: String,
        next: AtomicU64,
    }

    impl SequentialIds {
        /// Create a generator starting at 1
        #[must_use]
        pub fn new(prefix: impl Into<String>) -> Self {
            Self {
                prefix: prefix.into(),
                next: AtomicU64::new(1),
            }
        }
    }

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> String {
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            format!("{}-{n}", self.prefix)
        }
    }
}

// Re-export commonly used items
pub use kv_mocks::InMemoryKeyValueStore;
pub use mocks::{FixedClock, SequentialIds, test_clock};
pub use reducer_test::{ReducerOutcome, ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().timestamp(), 1_735_689_600);
    }

    #[test]
    fn sequential_ids_never_repeat() {
        let ids = SequentialIds::new("x");
        let generated: Vec<String> = (0..5).map(|_| ids.next_id()).collect();
        assert_eq!(generated, ["x-1", "x-2", "x-3", "x-4", "x-5"]);
    }
}
