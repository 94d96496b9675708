//! The long-lived state manager a presentation layer talks to.

use crate::input::TodoText;
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{Todo, TodoAction, TodoId, TodoState};
use crate::view::PrioritiesView;
use priorities_runtime::{EffectHandle, Store, StoreError};
use std::time::Duration;
use tokio::sync::broadcast;

/// Store specialised to the priority list
pub type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Owns the priority list for the lifetime of the process
///
/// Construct once, call [`load`](Self::load) once, then forward user intents.
/// Storage failures never surface here; they are logged and the list keeps
/// working in memory.
///
/// # Example
///
/// ```no_run
/// use priorities::{PrioritiesConfig, TodoEnvironment, TodoManager, TodoText};
/// use priorities::file_store::FileKeyValueStore;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let storage = Arc::new(FileKeyValueStore::new(".priorities"));
/// let manager = TodoManager::new(TodoEnvironment::production(storage, PrioritiesConfig::default()));
///
/// manager.load().await?;
/// manager.add(TodoText::parse("Write report")?).await?;
///
/// let view = manager.view().await;
/// println!("{}", view.header());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TodoManager {
    store: TodoStore,
    capacity: usize,
}

impl TodoManager {
    /// Creates a manager with an empty list
    #[must_use]
    pub fn new(env: TodoEnvironment) -> Self {
        let capacity = env.config.capacity;
        Self {
            store: Store::new(TodoState::new(), TodoReducer::new(), env),
            capacity,
        }
    }

    /// Hydrate the list from storage and wait until it is in place
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`shutdown`](Self::shutdown).
    pub async fn load(&self) -> Result<(), StoreError> {
        let mut handle = self.store.send(TodoAction::Load).await?;
        handle.wait().await;
        tracing::info!(count = self.store.state(TodoState::count).await, "Todos loaded");
        Ok(())
    }

    /// Append an entry unless the list is full
    ///
    /// The returned handle completes once the write has been attempted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`shutdown`](Self::shutdown).
    pub async fn add(&self, text: TodoText) -> Result<EffectHandle, StoreError> {
        self.store.send(TodoAction::Add { text }).await
    }

    /// Mark an entry completed; it is removed after the expiry delay
    ///
    /// The returned handle completes once the entry has been removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`shutdown`](Self::shutdown).
    pub async fn complete(&self, id: &TodoId) -> Result<EffectHandle, StoreError> {
        self.store
            .send(TodoAction::Complete { id: id.clone() })
            .await
    }

    /// Current list plus derived counters
    pub async fn view(&self) -> PrioritiesView {
        let capacity = self.capacity;
        self.store
            .state(|state| PrioritiesView::from_state(state, capacity))
            .await
    }

    /// Current entries
    pub async fn todos(&self) -> Vec<Todo> {
        self.store.state(|state| state.todos.clone()).await
    }

    /// Actions the manager applied on its own (hydration, expiry)
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TodoAction> {
        self.store.subscribe_actions()
    }

    /// Stop accepting intents and wait for in-flight writes
    ///
    /// Pending expiries are cancelled; a completed entry stays stored as
    /// completed and is removed one delay after the next [`load`](Self::load).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if effects are still running
    /// after `timeout`.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        self.store.shutdown(timeout).await
    }
}

impl std::fmt::Debug for TodoManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoManager")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
