//! # Stride Core
//!
//! Kinematic character movement driven by a keyed behavior state machine.
//!
//! A character is an [`Entity`](entity::Entity): a capsule body with
//! velocity, grounding and facing. Exactly one behavior state is active per
//! character; each tick it mutates velocity and orientation, then the entity
//! moves through the collision world and re-evaluates its grounding.
//!
//! ## Architecture
//!
//! - **Entity**: movement primitives, ground probe, movement application
//! - **State**: behaviors keyed by a closed enum, built once per key
//! - **State Manager**: the active state, deferred transitions, notifications
//! - **Simulation**: fixed-order tick driver gated by a pausable clock
//! - **Player**: the worked instance (stats, input, jump rules, four states)
//!
//! Collision queries go through [`sweep`], re-exported here.
//!
//! ## Usage
//!
//! ```
//! use glam::{Vec2, Vec3};
//! use stride_core::player::{Player, PlayerConfig, PlayerState};
//! use stride_core::simulation::Simulation;
//! use stride_core::sweep::{Collider, StaticWorld};
//!
//! let mut world = StaticWorld::new();
//! world.add(Collider::ground(0.0));
//!
//! let config = PlayerConfig::default();
//! let player = Player::from_config(&config)?.with_position(Vec3::new(0.0, 1.0, 0.0));
//! let mut sim = Simulation::new(player, world, &config.states);
//!
//! sim.actor_mut().input_mut().set_movement(Vec2::new(0.0, 1.0));
//! for _ in 0..60 {
//!     sim.step(1.0 / 60.0);
//! }
//!
//! assert_eq!(sim.current_state(), Some(PlayerState::Walk));
//! # Ok::<(), stride_core::error::ConfigError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

// Re-export sweep for collision worlds
pub use sweep;

pub mod clock;
pub mod entity;
pub mod error;
pub mod math;
pub mod player;
pub mod signal;
pub mod simulation;
pub mod state;

#[cfg(test)]
mod tests;
