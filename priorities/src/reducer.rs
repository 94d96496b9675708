//! Reducer logic for the priority list.
//!
//! Every mutation is a synchronous step on [`TodoState`]; persistence and the
//! delayed removal of completed entries are returned as effects.

use crate::config::PrioritiesConfig;
use crate::persistence::TodoRepository;
use crate::types::{Todo, TodoAction, TodoId, TodoState};
use priorities_core::{
    SmallVec,
    effect::Effect,
    environment::{Clock, IdGenerator, SystemClock},
    reducer::Reducer,
    smallvec,
    storage::KeyValueStore,
};
use std::collections::HashSet;
use std::sync::Arc;

/// Random v4 UUID identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for creation timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of new entry ids
    pub ids: Arc<dyn IdGenerator>,
    /// Where snapshots are written
    pub repository: TodoRepository,
    /// Capacity, expiry delay and storage key
    pub config: PrioritiesConfig,
}

impl TodoEnvironment {
    /// Creates a `TodoEnvironment` storing under `config.storage_key`
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        storage: Arc<dyn KeyValueStore>,
        config: PrioritiesConfig,
    ) -> Self {
        let repository = TodoRepository::new(storage, config.storage_key.as_str());
        Self {
            clock,
            ids,
            repository,
            config,
        }
    }

    /// System clock and random ids
    #[must_use]
    pub fn production(storage: Arc<dyn KeyValueStore>, config: PrioritiesConfig) -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidIds), storage, config)
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment")
            .field("repository", &self.repository)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Reducer for the priority list
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Fire-and-forget write of the current list
    ///
    /// Writes are not ordered against each other; each one is a full
    /// snapshot, so the next mutation's write repairs a stale one.
    fn persist(state: &TodoState, env: &TodoEnvironment) -> Effect<TodoAction> {
        let snapshot = state.todos.clone();
        let repository = env.repository.clone();
        Effect::fire_and_forget(async move {
            match repository.write_all(&snapshot).await {
                Ok(()) => tracing::trace!(count = snapshot.len(), "Persisted todos"),
                Err(error) => tracing::warn!(%error, "Failed to persist todos; continuing in memory"),
            }
        })
    }

    /// Read the stored list and feed it back as `Loaded`
    ///
    /// Missing, unreadable and corrupt records all leave state untouched.
    fn load(env: &TodoEnvironment) -> Effect<TodoAction> {
        let repository = env.repository.clone();
        Effect::Future(Box::pin(async move {
            match repository.read_all().await {
                Ok(Some(todos)) => Some(TodoAction::Loaded { todos }),
                Ok(None) => {
                    tracing::debug!(key = repository.key(), "No stored todos");
                    None
                },
                Err(error) => {
                    tracing::warn!(%error, "Failed to load todos; starting empty");
                    None
                },
            }
        }))
    }

    fn expire_later(id: TodoId, env: &TodoEnvironment) -> Effect<TodoAction> {
        Effect::delay(env.config.expiry_delay, TodoAction::Expire { id })
    }

    /// Restore the list invariants on a stored list
    ///
    /// Keeps the first occurrence of each id and at most `capacity` entries.
    fn sanitize(todos: Vec<Todo>, capacity: usize) -> Vec<Todo> {
        let stored = todos.len();
        let mut seen = HashSet::new();
        let mut kept: Vec<Todo> = todos
            .into_iter()
            .filter(|todo| seen.insert(todo.id.clone()))
            .collect();

        if kept.len() != stored {
            tracing::warn!(
                dropped = stored - kept.len(),
                "Stored todos contained duplicate ids"
            );
        }
        if kept.len() > capacity {
            tracing::warn!(
                stored = kept.len(),
                capacity,
                "Stored todos exceed capacity; keeping the oldest"
            );
            kept.truncate(capacity);
        }
        kept
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::debug!(action = action.kind(), "Reducing");

        match action {
            TodoAction::Load => smallvec![Self::load(env)],

            TodoAction::Loaded { todos } => {
                state.todos = Self::sanitize(todos, env.config.capacity);
                tracing::debug!(count = state.count(), "Hydrated todos");

                // Entries stored mid-expiry still have to go
                state
                    .todos
                    .iter()
                    .filter(|todo| todo.completed)
                    .map(|todo| Self::expire_later(todo.id.clone(), env))
                    .collect()
            },

            TodoAction::Add { text } => {
                if state.is_at_capacity(env.config.capacity) {
                    tracing::debug!(capacity = env.config.capacity, "List full; add ignored");
                    return SmallVec::new();
                }

                let id = TodoId::new(env.ids.next_id());
                if state.contains(&id) {
                    tracing::warn!(%id, "Generated id already in use; add ignored");
                    return SmallVec::new();
                }

                let created_at = env.clock.now().timestamp_millis();
                tracing::debug!(%id, %text, "Todo added");
                state.todos.push(Todo::new(id, text, created_at));

                smallvec![Self::persist(state, env)]
            },

            TodoAction::Complete { id } => {
                let Some(todo) = state.todos.iter_mut().find(|t| t.id == id) else {
                    tracing::debug!(%id, "Unknown todo; complete ignored");
                    return SmallVec::new();
                };
                if todo.completed {
                    return SmallVec::new();
                }
                todo.completed = true;

                smallvec![Self::persist(state, env), Self::expire_later(id, env)]
            },

            TodoAction::Expire { id } => {
                let before = state.count();
                state.todos.retain(|t| t.id != id);
                if state.count() == before {
                    // Already gone
                    return SmallVec::new();
                }

                smallvec![Self::persist(state, env)]
            },
        }
    }
}
