//! Test worlds and player factories.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec3;
use sweep::{Collider, StaticWorld};

use crate::entity::Entity;
use crate::player::{Player, PlayerConfig, PlayerInput, PlayerState, StatsManager};
use crate::signal::Signal;
use crate::simulation::Simulation;
use crate::state::Actor;

/// Tick length used by the scenarios.
pub const DT: f32 = 1.0 / 60.0;

/// Player simulation against a static world.
pub type PlayerSim = Simulation<Player, StaticWorld>;

// =============================================================================
// Worlds
// =============================================================================

/// Infinite floor at y = 0.
pub fn floor_world() -> StaticWorld {
    let mut world = StaticWorld::new();
    world.add(Collider::ground(0.0).with_tag("Ground"));
    world
}

/// A slab with its top at y = 0 covering x in [-20, 0], nothing beyond.
pub fn ledge_world() -> StaticWorld {
    let mut world = StaticWorld::new();
    world.add(
        Collider::aabb(Vec3::new(-10.0, -0.5, 0.0), Vec3::new(10.0, 0.5, 20.0)).with_tag("Ledge"),
    );
    world
}

// =============================================================================
// Players
// =============================================================================

/// Grounded player standing at `position` (capsule bottom at `position.y - 1`).
pub fn grounded_player(position: Vec3) -> Player {
    Player::from_config(&PlayerConfig::default())
        .expect("default config is valid")
        .with_position(position)
}

/// Airborne player at `position`.
pub fn airborne_player(position: Vec3) -> Player {
    let entity = Entity::new(PlayerConfig::default().body)
        .with_position(position)
        .with_grounded(false);
    Player::new(entity, StatsManager::default(), PlayerInput::default())
}

/// Simulation with every player state declared.
pub fn player_sim(player: Player, world: StaticWorld) -> PlayerSim {
    Simulation::new(player, world, &PlayerState::ALL)
}

/// Grounded player on an infinite floor.
pub fn standing_sim() -> PlayerSim {
    player_sim(grounded_player(Vec3::new(0.0, 1.0, 0.0)), floor_world())
}

// =============================================================================
// Driving
// =============================================================================

/// Steps `ticks` times.
pub fn run(sim: &mut PlayerSim, ticks: usize) {
    for _ in 0..ticks {
        sim.step(DT);
    }
}

/// Steps until `done` holds or `limit` ticks pass. Returns the ticks taken.
pub fn run_until(sim: &mut PlayerSim, limit: usize, done: impl Fn(&PlayerSim) -> bool) -> usize {
    for tick in 0..limit {
        if done(sim) {
            return tick;
        }
        sim.step(DT);
    }
    assert!(done(sim), "condition not reached within {limit} ticks");
    limit
}

/// Presses jump at the current simulation time.
pub fn press_jump(sim: &mut PlayerSim) {
    let now = sim.clock().time();
    sim.actor_mut().input_mut().press_jump(now);
}

/// Counts emissions of a unit signal.
pub fn count(signal: &mut Signal) -> Rc<Cell<u32>> {
    let hits = Rc::new(Cell::new(0));
    let seen = Rc::clone(&hits);
    signal.connect(move |_| seen.set(seen.get() + 1));
    hits
}

/// The player's entity.
pub fn body(sim: &PlayerSim) -> &Entity {
    sim.actor().entity()
}
