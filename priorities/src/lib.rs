//! Priorities: a short list of the things that matter today.
//!
//! The list holds at most five entries. Adding to a full list does nothing;
//! completing an entry marks it done and removes it a second later. The whole
//! list is written to local storage after every change and read back once at
//! startup.
//!
//! # Quick Start
//!
//! ```no_run
//! use priorities::{PrioritiesConfig, TodoEnvironment, TodoManager, TodoText};
//! use priorities::file_store::FileKeyValueStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = Arc::new(FileKeyValueStore::new(".priorities"));
//! let manager = TodoManager::new(TodoEnvironment::production(storage, PrioritiesConfig::default()));
//! manager.load().await?;
//!
//! manager.add(TodoText::parse("Write report")?).await?;
//! let id = manager.todos().await[0].id.clone();
//!
//! // Completed now, gone after the expiry delay
//! let mut removal = manager.complete(&id).await?;
//! removal.wait().await;
//! assert!(manager.todos().await.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod file_store;
pub mod input;
pub mod manager;
pub mod persistence;
pub mod reducer;
pub mod terminal;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use config::PrioritiesConfig;
pub use input::{InputError, TodoText};
pub use manager::TodoManager;
pub use persistence::{PersistenceError, TodoRepository};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use types::{Todo, TodoAction, TodoId, TodoState};
pub use view::PrioritiesView;
