//! Behavior states and the traits tying them to an actor.
//!
//! An [`Actor`] owns an [`Entity`] and declares a closed set of state keys
//! (usually a fieldless enum). Each key maps to one [`EntityState`] behavior,
//! built once by [`Actor::create_state`] and reused for the lifetime of the
//! [`StateManager`]. Exactly one state is active per actor; it is stepped
//! once per tick and may request transitions through its [`StateContext`].
//!
//! Transitions requested from a hook are deferred: they are queued on the
//! context and applied in request order once the hook has returned, so a
//! state never observes the manager mid-transition.
//!
//! # Example
//!
//! ```
//! use stride_core::entity::{Body, Entity};
//! use stride_core::state::{Actor, EntityState, StateContext};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Mode {
//!     Rest,
//!     Drift,
//! }
//!
//! struct Crate {
//!     entity: Entity,
//! }
//!
//! struct Rest;
//! struct Drift;
//!
//! impl EntityState<Crate> for Rest {
//!     fn on_step(&mut self, actor: &mut Crate, ctx: &mut StateContext<Mode>) {
//!         if actor.entity.velocity().length() > 0.0 {
//!             ctx.change(Mode::Drift);
//!         }
//!     }
//! }
//!
//! impl EntityState<Crate> for Drift {
//!     fn on_step(&mut self, actor: &mut Crate, ctx: &mut StateContext<Mode>) {
//!         actor.entity.decelerate(10.0);
//!         if actor.entity.velocity().length() == 0.0 {
//!             ctx.change(Mode::Rest);
//!         }
//!     }
//! }
//!
//! impl Actor for Crate {
//!     type State = Mode;
//!
//!     fn entity(&self) -> &Entity {
//!         &self.entity
//!     }
//!
//!     fn entity_mut(&mut self) -> &mut Entity {
//!         &mut self.entity
//!     }
//!
//!     fn create_state(key: Mode) -> Box<dyn EntityState<Self>> {
//!         match key {
//!             Mode::Rest => Box::new(Rest),
//!             Mode::Drift => Box::new(Drift),
//!         }
//!     }
//! }
//!
//! let _crate = Crate { entity: Entity::new(Body::default()) };
//! ```

pub mod manager;

use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

use crate::clock::FrameTime;
use crate::entity::{Entity, GroundTransition};
use crate::signal::Signal;

pub use manager::{StateChange, StateManager, StateManagerEvents, MAX_CHAINED_TRANSITIONS};

// =============================================================================
// Traits
// =============================================================================

/// Identity of a state: a small copyable key, typically a fieldless enum.
pub trait StateKey: Copy + Eq + Hash + fmt::Debug + 'static {}

impl<T: Copy + Eq + Hash + fmt::Debug + 'static> StateKey for T {}

/// Something that owns an [`Entity`] and is driven by a state machine.
///
/// The actor is passed explicitly into every state hook; states never hold a
/// reference back to it.
pub trait Actor: Sized + 'static {
    /// Closed set of state keys this actor can be in.
    type State: StateKey;

    /// The kinematic body.
    fn entity(&self) -> &Entity;

    /// The kinematic body, mutably.
    fn entity_mut(&mut self) -> &mut Entity;

    /// Builds the behavior for `key`. Called once per declared key.
    fn create_state(key: Self::State) -> Box<dyn EntityState<Self>>;

    /// Called after every ground evaluation with its outcome.
    fn on_ground_transition(&mut self, _transition: &GroundTransition) {}

    /// Called once at the end of every running tick.
    fn on_tick_end(&mut self) {}
}

/// Behavior of one state.
///
/// Hooks receive the actor and a [`StateContext`] for the current tick.
/// Transitions requested via [`StateContext::change`] are applied after the
/// hook returns.
pub trait EntityState<A: Actor> {
    /// Runs when the state becomes active.
    fn on_enter(&mut self, _actor: &mut A, _ctx: &mut StateContext<A::State>) {}

    /// Runs when the state stops being active.
    fn on_exit(&mut self, _actor: &mut A, _ctx: &mut StateContext<A::State>) {}

    /// Runs once per tick while the state is active.
    fn on_step(&mut self, actor: &mut A, ctx: &mut StateContext<A::State>);
}

// =============================================================================
// State Context
// =============================================================================

/// Per-call view handed to state hooks.
#[derive(Debug, Clone)]
pub struct StateContext<K> {
    time: FrameTime,
    time_since_entered: f32,
    pending: VecDeque<K>,
}

impl<K: StateKey> StateContext<K> {
    /// Creates a context for a tick with the given frame time.
    #[must_use]
    pub fn new(time: FrameTime) -> Self {
        Self {
            time,
            time_since_entered: 0.0,
            pending: VecDeque::new(),
        }
    }

    /// Requests a transition to `key` once the current hook returns.
    ///
    /// Multiple requests are applied in order.
    pub fn change(&mut self, key: K) {
        self.pending.push_back(key);
    }

    /// Scaled seconds since the previous tick.
    #[must_use]
    pub const fn delta(&self) -> f32 {
        self.time.delta
    }

    /// Scaled seconds since the simulation started.
    #[must_use]
    pub const fn time(&self) -> f32 {
        self.time.time
    }

    /// Seconds the state running the hook has been active.
    #[must_use]
    pub const fn time_since_entered(&self) -> f32 {
        self.time_since_entered
    }

    /// Transitions requested so far and not yet applied.
    pub fn pending(&self) -> impl Iterator<Item = &K> + '_ {
        self.pending.iter()
    }

    /// Returns `true` if any transition is waiting.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub(crate) fn next_pending(&mut self) -> Option<K> {
        self.pending.pop_front()
    }

    pub(crate) fn discard_pending(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }
}

// =============================================================================
// State Handle
// =============================================================================

/// Stable index of a state inside its manager.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateHandle(usize);

impl StateHandle {
    /// Creates a handle from a raw index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for StateHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateHandle({})", self.0)
    }
}

impl From<usize> for StateHandle {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

// =============================================================================
// State Instance
// =============================================================================

/// One declared state: its key, behavior, timer and observers.
pub struct StateInstance<A: Actor> {
    key: A::State,
    behavior: Box<dyn EntityState<A>>,
    time_since_entered: f32,
    /// Fires with the state's key every time it is entered.
    pub on_enter: Signal<A::State>,
    /// Fires with the state's key every time it is exited.
    pub on_exit: Signal<A::State>,
}

impl<A: Actor> StateInstance<A> {
    /// Builds the instance for `key` via [`Actor::create_state`].
    #[must_use]
    pub fn new(key: A::State) -> Self {
        Self {
            key,
            behavior: A::create_state(key),
            time_since_entered: 0.0,
            on_enter: Signal::new(),
            on_exit: Signal::new(),
        }
    }

    /// The state's key.
    #[must_use]
    pub fn key(&self) -> A::State {
        self.key
    }

    /// Seconds since the state was last entered.
    #[must_use]
    pub const fn time_since_entered(&self) -> f32 {
        self.time_since_entered
    }

    /// Resets the timer, notifies enter observers, then runs the enter hook.
    pub fn enter(&mut self, actor: &mut A, ctx: &mut StateContext<A::State>) {
        self.time_since_entered = 0.0;
        self.on_enter.emit(&self.key);
        ctx.time_since_entered = 0.0;
        self.behavior.on_enter(actor, ctx);
    }

    /// Notifies exit observers, then runs the exit hook.
    pub fn exit(&mut self, actor: &mut A, ctx: &mut StateContext<A::State>) {
        self.on_exit.emit(&self.key);
        ctx.time_since_entered = self.time_since_entered;
        self.behavior.on_exit(actor, ctx);
    }

    /// Runs the step hook, then advances the timer by the tick delta.
    pub fn step(&mut self, actor: &mut A, ctx: &mut StateContext<A::State>) {
        ctx.time_since_entered = self.time_since_entered;
        self.behavior.on_step(actor, ctx);
        self.time_since_entered += ctx.delta();
    }
}

impl<A: Actor> fmt::Debug for StateInstance<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateInstance")
            .field("key", &self.key)
            .field("time_since_entered", &self.time_since_entered)
            .field("on_enter", &self.on_enter)
            .field("on_exit", &self.on_exit)
            .finish_non_exhaustive()
    }
}
