//! The keyed state machine that owns an actor's behavior states.
//!
//! [`StateManager`] keeps the declared states in a stable, ordered list and a
//! key lookup. It never holds the actor: every call that runs hooks takes the
//! actor explicitly, together with the [`Clock`] that gates it.
//!
//! While the clock is paused, [`step`](StateManager::step) does nothing and
//! [`change`](StateManager::change) requests are dropped.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use super::{Actor, StateContext, StateHandle, StateInstance};
use crate::clock::Clock;
use crate::error::StateError;
use crate::signal::Signal;

/// Upper bound on transitions applied by one `step` or `change` call.
///
/// States that keep requesting each other from their enter hooks would
/// otherwise never settle.
pub const MAX_CHAINED_TRANSITIONS: usize = 16;

/// Payload of [`StateManagerEvents::on_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange<K> {
    /// State that was exited, `None` if nothing was active.
    pub from: Option<K>,
    /// State that was entered.
    pub to: K,
}

/// Manager-level notifications.
#[derive(Debug)]
pub struct StateManagerEvents<K> {
    /// Fires once per applied transition, after the new state's enter hook.
    pub on_change: Signal<StateChange<K>>,
}

impl<K> Default for StateManagerEvents<K> {
    fn default() -> Self {
        Self {
            on_change: Signal::new(),
        }
    }
}

/// Finite state machine over an actor's declared states.
pub struct StateManager<A: Actor> {
    states: Vec<StateInstance<A>>,
    lookup: HashMap<A::State, usize>,
    current: Option<usize>,
    last: Option<usize>,
    /// Transition notifications.
    pub events: StateManagerEvents<A::State>,
}

impl<A: Actor> Default for StateManager<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Actor> StateManager<A> {
    /// Creates an empty manager. It does nothing until initialized.
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            lookup: HashMap::new(),
            current: None,
            last: None,
            events: StateManagerEvents::default(),
        }
    }

    /// Creates a manager initialized with `keys`.
    #[must_use]
    pub fn with_states(keys: &[A::State]) -> Self {
        let mut manager = Self::new();
        manager.initialize_states(keys);
        manager
    }

    /// Builds one state per distinct key, in order.
    ///
    /// Duplicate keys are ignored (the first occurrence wins). The first key
    /// becomes current without running its enter hook; `last` stays `None`.
    /// Calling this again discards the previous states.
    pub fn initialize_states(&mut self, keys: &[A::State]) {
        self.states.clear();
        self.lookup.clear();
        self.current = None;
        self.last = None;

        for &key in keys {
            if self.lookup.contains_key(&key) {
                debug!(target: "stride::state", key = ?key, "skipping duplicate state");
                continue;
            }
            self.lookup.insert(key, self.states.len());
            self.states.push(StateInstance::new(key));
        }

        if !self.states.is_empty() {
            self.current = Some(0);
        }
    }

    // -------------------------------------------------------------------------
    // Tick
    // -------------------------------------------------------------------------

    /// Steps the current state, then applies the transitions it requested.
    ///
    /// Does nothing while paused or before initialization.
    pub fn step(&mut self, actor: &mut A, clock: &Clock) {
        if !clock.is_running() {
            return;
        }
        let Some(index) = self.current else {
            return;
        };

        let mut ctx = StateContext::new(clock.frame_time());
        self.states[index].step(actor, &mut ctx);
        self.apply_pending(actor, &mut ctx);
    }

    /// Transitions to the state behind `handle`.
    ///
    /// Returns `Ok(false)` when paused. Re-entering the current state runs
    /// its exit and enter hooks.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InvalidHandle`] if `handle` is out of range.
    /// Nothing changes and no notification fires.
    pub fn change(
        &mut self,
        actor: &mut A,
        handle: StateHandle,
        clock: &Clock,
    ) -> Result<bool, StateError> {
        let index = handle.index();
        if index >= self.states.len() {
            warn!(target: "stride::state", index, "invalid state handle");
            return Err(StateError::InvalidHandle(index));
        }
        if !clock.is_running() {
            return Ok(false);
        }

        let mut ctx = StateContext::new(clock.frame_time());
        self.transition(actor, index, &mut ctx);
        self.apply_pending(actor, &mut ctx);
        Ok(true)
    }

    /// Transitions to the state registered under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Unregistered`] if `key` was never declared.
    /// Nothing changes and no notification fires.
    pub fn change_to(
        &mut self,
        actor: &mut A,
        key: A::State,
        clock: &Clock,
    ) -> Result<bool, StateError> {
        let Some(handle) = self.handle(key) else {
            warn!(target: "stride::state", key = ?key, "change to unregistered state");
            return Err(StateError::Unregistered(format!("{key:?}")));
        };
        self.change(actor, handle, clock)
    }

    fn transition(&mut self, actor: &mut A, to: usize, ctx: &mut StateContext<A::State>) {
        let from = self.current;
        if let Some(from) = from {
            self.states[from].exit(actor, ctx);
        }
        self.last = from;
        self.current = Some(to);
        self.states[to].enter(actor, ctx);

        let change = StateChange {
            from: from.map(|i| self.states[i].key()),
            to: self.states[to].key(),
        };
        debug!(target: "stride::state", from = ?change.from, to = ?change.to, "state change");
        self.events.on_change.emit(&change);
    }

    fn apply_pending(&mut self, actor: &mut A, ctx: &mut StateContext<A::State>) {
        let mut applied = 0;
        while let Some(key) = ctx.next_pending() {
            if applied == MAX_CHAINED_TRANSITIONS {
                let dropped = ctx.discard_pending() + 1;
                warn!(
                    target: "stride::state",
                    limit = MAX_CHAINED_TRANSITIONS,
                    dropped,
                    "chained transition limit reached"
                );
                return;
            }
            let Some(&index) = self.lookup.get(&key) else {
                warn!(target: "stride::state", key = ?key, "requested state is not registered");
                continue;
            };
            self.transition(actor, index, ctx);
            applied += 1;
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Index of the current state.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.current
    }

    /// Index of the previously active state.
    #[must_use]
    pub const fn last_index(&self) -> Option<usize> {
        self.last
    }

    /// The current state.
    #[must_use]
    pub fn current(&self) -> Option<&StateInstance<A>> {
        self.current.map(|i| &self.states[i])
    }

    /// Key of the current state.
    #[must_use]
    pub fn current_key(&self) -> Option<A::State> {
        self.current().map(StateInstance::key)
    }

    /// Key of the previously active state.
    #[must_use]
    pub fn last_key(&self) -> Option<A::State> {
        self.last.map(|i| self.states[i].key())
    }

    /// Returns `true` if `key` is the active state.
    #[must_use]
    pub fn is_current(&self, key: A::State) -> bool {
        self.current_key() == Some(key)
    }

    /// Handle of the state registered under `key`.
    #[must_use]
    pub fn handle(&self, key: A::State) -> Option<StateHandle> {
        self.lookup.get(&key).copied().map(StateHandle::new)
    }

    /// State registered under `key`.
    #[must_use]
    pub fn get(&self, key: A::State) -> Option<&StateInstance<A>> {
        self.lookup.get(&key).map(|&i| &self.states[i])
    }

    /// State registered under `key`, mutably (for connecting observers).
    pub fn get_mut(&mut self, key: A::State) -> Option<&mut StateInstance<A>> {
        self.lookup.get(&key).map(|&i| &mut self.states[i])
    }

    /// Returns `true` if `key` was declared.
    #[must_use]
    pub fn contains(&self, key: A::State) -> bool {
        self.lookup.contains_key(&key)
    }

    /// Declared keys in list order.
    pub fn keys(&self) -> impl Iterator<Item = A::State> + '_ {
        self.states.iter().map(StateInstance::key)
    }

    /// Number of declared states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` before initialization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<A: Actor> fmt::Debug for StateManager<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateManager")
            .field("states", &self.keys().collect::<Vec<_>>())
            .field("current", &self.current_key())
            .field("last", &self.last_key())
            .finish_non_exhaustive()
    }
}
