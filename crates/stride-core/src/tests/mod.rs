//! Scenario, determinism and property tests for the full tick pipeline.
//!
//! - `helpers.rs`: worlds, player factories and tick runners
//! - `integration.rs`: end-to-end player scenarios through [`Simulation`]
//! - `determinism.rs`: identical inputs replay identically
//! - `properties.rs`: proptest invariants of the movement primitives and
//!   the state manager
//!
//! [`Simulation`]: crate::simulation::Simulation

mod determinism;
mod helpers;

pub use helpers::*;
