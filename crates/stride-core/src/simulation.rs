//! Fixed-order tick driver.
//!
//! [`Simulation`] owns one actor, its [`StateManager`], a collision world and
//! the [`Clock`]. Each [`step`](Simulation::step) runs, in order:
//!
//! 1. **STATE**: the active state mutates velocity and orientation
//! 2. **MOVE**: velocity is applied to position through the collision world
//! 3. **GROUND**: grounding is re-evaluated, the actor sees the outcome
//!
//! Results of one tick are visible to the states on the next. While the
//! clock is paused the whole tick is skipped.
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use stride_core::player::{Player, PlayerConfig, PlayerState};
//! use stride_core::simulation::Simulation;
//! use sweep::{Collider, StaticWorld};
//!
//! let mut world = StaticWorld::new();
//! world.add(Collider::ground(0.0));
//!
//! let config = PlayerConfig::default();
//! let player = Player::from_config(&config)
//!     .unwrap()
//!     .with_position(Vec3::new(0.0, 1.0, 0.0));
//! let mut sim = Simulation::new(player, world, &config.states);
//!
//! for _ in 0..10 {
//!     sim.step(1.0 / 60.0);
//! }
//!
//! assert_eq!(sim.current_state(), Some(PlayerState::Idle));
//! assert_eq!(sim.clock().frame(), 10);
//! ```

use std::fmt;

use sweep::CollisionWorld;

use crate::clock::Clock;
use crate::error::StateError;
use crate::state::{Actor, StateHandle, StateManager};

/// One actor simulated against a collision world.
pub struct Simulation<A: Actor, W: CollisionWorld> {
    actor: A,
    states: StateManager<A>,
    world: W,
    clock: Clock,
}

impl<A: Actor, W: CollisionWorld> Simulation<A, W> {
    /// Creates a simulation with the given declared states.
    ///
    /// The first state in `keys` starts active.
    #[must_use]
    pub fn new(actor: A, world: W, keys: &[A::State]) -> Self {
        Self {
            actor,
            states: StateManager::with_states(keys),
            world,
            clock: Clock::new(),
        }
    }

    /// Advances by `dt` unscaled seconds.
    pub fn step(&mut self, dt: f32) {
        self.clock.advance(dt);
        if !self.clock.is_running() {
            return;
        }

        self.actor.entity_mut().set_time(self.clock.frame_time());

        // STATE
        self.states.step(&mut self.actor, &self.clock);

        // MOVE
        self.actor.entity_mut().handle_controller(&self.world);

        // GROUND
        let transition = self.actor.entity_mut().handle_ground(&self.world);
        self.actor.on_ground_transition(&transition);

        self.actor.on_tick_end();
    }

    /// Forces a transition to `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Unregistered`] if `key` was not declared.
    pub fn change_to(&mut self, key: A::State) -> Result<bool, StateError> {
        self.sync_time();
        self.states.change_to(&mut self.actor, key, &self.clock)
    }

    /// Forces a transition to the state behind `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InvalidHandle`] if `handle` is out of range.
    pub fn change(&mut self, handle: StateHandle) -> Result<bool, StateError> {
        self.sync_time();
        self.states.change(&mut self.actor, handle, &self.clock)
    }

    fn sync_time(&mut self) {
        let time = self.clock.frame_time();
        self.actor.entity_mut().set_time(time);
    }

    // -------------------------------------------------------------------------
    // Clock
    // -------------------------------------------------------------------------

    /// Pauses: ticks and forced transitions become inert.
    pub fn pause(&mut self) {
        self.clock.pause();
    }

    /// Resumes at normal speed.
    pub fn resume(&mut self) {
        self.clock.resume();
    }

    /// Sets the time scale. At or below zero pauses.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.clock.set_time_scale(scale);
    }

    /// The clock.
    #[must_use]
    pub const fn clock(&self) -> &Clock {
        &self.clock
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The actor.
    #[must_use]
    pub const fn actor(&self) -> &A {
        &self.actor
    }

    /// The actor, mutably (input writes, observer wiring).
    pub fn actor_mut(&mut self) -> &mut A {
        &mut self.actor
    }

    /// The state manager.
    #[must_use]
    pub const fn states(&self) -> &StateManager<A> {
        &self.states
    }

    /// The state manager, mutably (observer wiring).
    pub fn states_mut(&mut self) -> &mut StateManager<A> {
        &mut self.states
    }

    /// Key of the active state.
    #[must_use]
    pub fn current_state(&self) -> Option<A::State> {
        self.states.current_key()
    }

    /// The collision world.
    #[must_use]
    pub const fn world(&self) -> &W {
        &self.world
    }

    /// The collision world, mutably (moving colliders between ticks).
    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }
}

impl<A: Actor, W: CollisionWorld> fmt::Debug for Simulation<A, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("states", &self.states)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
