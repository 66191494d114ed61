//! The player: an [`Entity`] driven by stats, input and four states.
//!
//! [`Player`] layers the player-specific rules on top of the entity
//! primitives: stat-driven acceleration, two-rate gravity, friction, and the
//! jump rules (grounded, coyote window, extra air jumps, buffered presses,
//! variable height on release). The [`PlayerState`] behaviors in
//! [`states`] decide which of these run each tick.
//!
//! # Example
//!
//! ```
//! use glam::{Vec2, Vec3};
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
//! sim.actor_mut().input_mut().set_movement(Vec2::new(1.0, 0.0));
//! sim.step(1.0 / 60.0);
//! assert_eq!(sim.current_state(), Some(PlayerState::Walk));
//! ```

pub mod config;
pub mod input;
pub mod states;
pub mod stats;

use glam::Vec3;
use tracing::debug;

use crate::entity::{Entity, GroundTransition};
use crate::error::ConfigError;
use crate::signal::Signal;
use crate::state::{Actor, EntityState, StateContext};

pub use config::PlayerConfig;
pub use input::{InputConfig, InputDevice, PlayerInput};
pub use states::PlayerState;
pub use stats::{PlayerStats, StatsManager};

/// Player-level notifications.
#[derive(Debug, Default)]
pub struct PlayerEvents {
    /// Fires on every jump with the jump counter after the jump.
    pub on_jump: Signal<u32>,
}

/// A player character.
#[derive(Debug)]
pub struct Player {
    entity: Entity,
    input: PlayerInput,
    stats: StatsManager,
    jump_counter: u32,
    /// Jump notifications.
    pub events: PlayerEvents,
}

impl Player {
    /// Creates a player from its parts.
    #[must_use]
    pub fn new(entity: Entity, stats: StatsManager, input: PlayerInput) -> Self {
        Self {
            entity,
            input,
            stats,
            jump_counter: 0,
            events: PlayerEvents::default(),
        }
    }

    /// Builds a player from a validated config.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] raised by validation.
    pub fn from_config(config: &PlayerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let stats = StatsManager::new(config.stat_sets.clone())?;
        Ok(Self::new(
            Entity::new(config.body),
            stats,
            PlayerInput::new(config.input),
        ))
    }

    /// Sets the spawn position.
    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.entity.set_position(position);
        self
    }

    /// Input state.
    #[must_use]
    pub const fn input(&self) -> &PlayerInput {
        &self.input
    }

    /// Input state, for the host to write.
    pub fn input_mut(&mut self) -> &mut PlayerInput {
        &mut self.input
    }

    /// Stat sets.
    #[must_use]
    pub const fn stats(&self) -> &StatsManager {
        &self.stats
    }

    /// Stat sets, mutably.
    pub fn stats_mut(&mut self) -> &mut StatsManager {
        &mut self.stats
    }

    /// Jumps made since last landing.
    #[must_use]
    pub const fn jump_counter(&self) -> u32 {
        self.jump_counter
    }

    /// Current simulation time as seen by the entity.
    #[must_use]
    pub fn now(&self) -> f32 {
        self.entity.time().time
    }

    // -------------------------------------------------------------------------
    // Movement
    // -------------------------------------------------------------------------

    /// Accelerates toward `direction` with the stats matching the current
    /// situation: running values when running, air acceleration when
    /// airborne.
    pub fn accelerate(&mut self, direction: Vec3) {
        let stats = self.stats.current();
        let run = self.input.is_running();
        let grounded = self.entity.is_grounded();

        let turning_drag = if grounded && run {
            stats.running_turning_drag
        } else {
            stats.turning_drag
        };
        let acceleration = if !grounded {
            stats.air_acceleration
        } else if run {
            stats.running_acceleration
        } else {
            stats.acceleration
        };
        let top_speed = if run {
            stats.running_top_speed
        } else {
            stats.top_speed
        };

        self.entity
            .accelerate(direction, turning_drag, acceleration, top_speed);
    }

    /// Turns toward `direction` at the stat rotation speed.
    pub fn face_direction_smooth(&mut self, direction: Vec3) {
        let speed = self.stats.current().rotation_speed;
        self.entity.face_direction(direction, speed);
    }

    /// Brakes at the stat deceleration.
    pub fn decelerate(&mut self) {
        let rate = self.stats.current().deceleration;
        self.entity.decelerate(rate);
    }

    /// Slows at the stat friction.
    pub fn friction(&mut self) {
        let rate = self.stats.current().friction;
        self.entity.decelerate(rate);
    }

    /// Pulls an airborne player down: `gravity` while rising, `fall_gravity`
    /// while falling, never past `-gravity_top_speed`.
    pub fn gravity(&mut self) {
        let stats = self.stats.current();
        let top = stats.gravity_top_speed;
        let speed = self.entity.vertical_speed();
        if self.entity.is_grounded() || speed <= -top {
            return;
        }

        let force = if speed > 0.0 {
            stats.gravity
        } else {
            stats.fall_gravity
        };
        let dt = self.entity.time().delta;
        let speed = (speed - force * self.entity.multipliers().gravity * dt).max(-top);
        self.entity.set_vertical_velocity(Vec3::new(0.0, speed, 0.0));
    }

    /// Requests [`PlayerState::Fall`] when airborne.
    pub fn fall(&mut self, ctx: &mut StateContext<PlayerState>) {
        if !self.entity.is_grounded() {
            ctx.change(PlayerState::Fall);
        }
    }

    // -------------------------------------------------------------------------
    // Jump
    // -------------------------------------------------------------------------

    /// Jumps if allowed and a press is buffered; shortens a rising jump on
    /// release.
    ///
    /// A jump is allowed while grounded, within the coyote window after
    /// walking off the ground, or as one of `multi_jumps` extra air jumps. The
    /// buffered press is only consumed when the jump is allowed, so an early
    /// press still fires once it becomes legal.
    pub fn jump(&mut self, ctx: &mut StateContext<PlayerState>) {
        let now = self.now();
        let stats = self.stats.current();
        let can_multi_jump = self.jump_counter > 0 && self.jump_counter <= stats.multi_jumps;
        let can_coyote_jump = self.jump_counter == 0
            && now < self.entity.last_ground_time() + stats.coyote_jump_threshold;
        let max_jump = stats.max_jump_height;
        let min_jump = stats.min_jump_height;

        if (self.entity.is_grounded() || can_multi_jump || can_coyote_jump)
            && self.input.take_jump_down(now)
        {
            self.jump_with_speed(max_jump, ctx);
        }

        if self.input.jump_released()
            && self.jump_counter > 0
            && self.entity.vertical_speed() > min_jump
        {
            self.entity
                .set_vertical_velocity(Vec3::new(0.0, min_jump, 0.0));
        }
    }

    /// Launches upward at `speed` and requests [`PlayerState::Fall`].
    pub fn jump_with_speed(&mut self, speed: f32, ctx: &mut StateContext<PlayerState>) {
        self.jump_counter += 1;
        self.entity
            .set_vertical_velocity(Vec3::new(0.0, speed, 0.0));
        debug!(target: "stride::player", counter = self.jump_counter, speed, "jump");
        ctx.change(PlayerState::Fall);
        self.events.on_jump.emit(&self.jump_counter);
    }

    /// Clears the jump counter.
    pub fn reset_jumps(&mut self) {
        self.jump_counter = 0;
    }
}

impl Actor for Player {
    type State = PlayerState;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn create_state(key: PlayerState) -> Box<dyn EntityState<Self>> {
        states::create(key)
    }

    fn on_ground_transition(&mut self, transition: &GroundTransition) {
        if *transition == GroundTransition::Entered {
            self.reset_jumps();
        }
    }

    fn on_tick_end(&mut self) {
        self.input.end_frame();
    }
}
