//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use priorities_core::{SmallVec, effect::Effect, reducer::Reducer};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// # Example
///
/// ```ignore
/// use priorities_testing::ReducerTest;
///
/// ReducerTest::new(TodoReducer::new())
///     .with_env(test_environment())
///     .given_state(TodoState::new())
///     .when_action(TodoAction::Add { text })
///     .then_state(|state| {
///         assert_eq!(state.count(), 1);
///     })
///     .then_effects(|effects| {
///         assert_eq!(effects.len(), 1);
///     })
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    action: Option<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            action: None,
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Set the action to test (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the resulting effects (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// The returned [`ReducerOutcome`] can drive the produced futures
    /// afterwards; ignore it when the assertions say everything.
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertions fail.
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) -> ReducerOutcome<S, A> {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let action = self.action.expect("Action must be set with when_action()");

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        let effects = self.reducer.reduce(&mut state, action, &env);

        for assertion in self.state_assertions {
            assertion(&state);
        }

        for assertion in self.effect_assertions {
            assertion(effects.as_slice());
        }

        ReducerOutcome { state, effects }
    }
}

/// State and effects left behind by one [`ReducerTest::run`]
pub struct ReducerOutcome<S, A> {
    /// State after the action
    pub state: S,
    effects: SmallVec<[Effect<A>; 4]>,
}

impl<S, A> ReducerOutcome<S, A> {
    /// Effects not yet run
    #[must_use]
    pub fn effects(&self) -> &[Effect<A>] {
        &self.effects
    }

    /// Await every `Future` effect in order, returning the actions they
    /// feed back
    ///
    /// Delays are left in place; a test asserts on them with
    /// [`assertions::expect_single_delay`] instead of waiting.
    pub async fn run_futures(&mut self) -> Vec<A> {
        let mut fed_back = Vec::new();
        let mut delays = SmallVec::new();
        for effect in std::mem::take(&mut self.effects) {
            match effect {
                Effect::Future(fut) => fed_back.extend(fut.await),
                Effect::None => {},
                other => delays.push(other),
            }
        }
        self.effects = delays;
        fed_back
    }
}

/// Helper assertions for effects
pub mod assertions {
    use super::ReducerOutcome;
    use crate::InMemoryKeyValueStore;
    use priorities_core::effect::Effect;
    use serde::de::DeserializeOwned;
    use std::fmt::Debug;
    use std::time::Duration;

    /// Run the outcome's futures and check `storage` then holds `expected`
    /// as JSON under `key`
    ///
    /// Futures that write nothing fail the assertion, so this also shows
    /// that a write was scheduled at all.
    ///
    /// # Panics
    ///
    /// Panics if nothing was written under `key` or the stored value differs.
    pub async fn assert_persists_snapshot<S, A, T>(
        outcome: &mut ReducerOutcome<S, A>,
        storage: &InMemoryKeyValueStore,
        key: &str,
        expected: &T,
    ) where
        T: DeserializeOwned + PartialEq + Debug,
    {
        let writes_before = storage.write_count();
        let _ = outcome.run_futures().await;

        assert!(
            storage.write_count() > writes_before,
            "Expected a write under {key:?}, but nothing was written"
        );
        let stored: Option<T> = storage.json(key);
        assert_eq!(stored.as_ref(), Some(expected), "Stored snapshot under {key:?}");
    }

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if effects is not empty.
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.is_empty() || matches!(effects, [Effect::None]),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that effects contain at least one Future effect
    ///
    /// # Panics
    ///
    /// Panics if no Future effect is found.
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Future(_))),
            "Expected at least one Future effect, but none found"
        );
    }

    /// Find the single `Delay` effect and return its duration and action
    ///
    /// # Panics
    ///
    /// Panics unless exactly one `Delay` effect is present.
    #[must_use]
    pub fn expect_single_delay<A>(effects: &[Effect<A>]) -> (Duration, &A) {
        let delays: Vec<(Duration, &A)> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::Delay { duration, action } => Some((*duration, action.as_ref())),
                _ => None,
            })
            .collect();
        assert_eq!(
            delays.len(),
            1,
            "Expected exactly one Delay effect, but found {}",
            delays.len()
        );
        delays[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use priorities_core::{SmallVec, smallvec};
    use std::time::Duration;

    #[derive(Clone, Debug)]
    struct TestState {
        count: i32,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Increment,
        Decrement,
        Later,
        Both,
    }

    struct TestReducer;

    struct TestEnv;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => {
                    state.count += 1;
                    smallvec![Effect::None]
                },
                TestAction::Decrement => {
                    state.count -= 1;
                    smallvec![Effect::None]
                },
                TestAction::Later => {
                    smallvec![Effect::delay(Duration::from_millis(5), TestAction::Increment)]
                },
                TestAction::Both => smallvec![
                    Effect::delay(Duration::from_millis(5), TestAction::Increment),
                    Effect::Future(Box::pin(async { Some(TestAction::Decrement) })),
                ],
            }
        }
    }

    #[test]
    fn test_reducer_test_increment() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Increment)
            .then_state(|state| {
                assert_eq!(state.count, 1);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_reducer_test_decrement() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 5 })
            .when_action(TestAction::Decrement)
            .then_state(|state| {
                assert_eq!(state.count, 4);
            })
            .run();
    }

    #[test]
    fn test_expect_single_delay() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Later)
            .then_effects(|effects| {
                let (duration, action) = assertions::expect_single_delay(effects);
                assert_eq!(duration, Duration::from_millis(5));
                assert_eq!(action, &TestAction::Increment);
            })
            .run();
    }

    #[tokio::test]
    async fn run_futures_feeds_back_and_keeps_delays() {
        let mut outcome = ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Both)
            .run();

        assert_eq!(outcome.run_futures().await, vec![TestAction::Decrement]);
        let (duration, _) = assertions::expect_single_delay(outcome.effects());
        assert_eq!(duration, Duration::from_millis(5));
        assert!(outcome.run_futures().await.is_empty());
    }

    #[test]
    fn test_assertions_effects_count() {
        assertions::assert_effects_count(&[Effect::<TestAction>::None], 1);
        assertions::assert_effects_count::<TestAction>(&[], 0);
    }
}
