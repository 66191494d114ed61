//! Replay tests: the same inputs on the same world produce bit-identical
//! kinematics and the same state history.

use glam::{Vec2, Vec3};

use crate::entity::KinematicSnapshot;
use crate::player::PlayerState;
use crate::state::Actor;

use super::helpers::{grounded_player, ledge_world, player_sim, PlayerSim, DT};

/// Scripted input for one tick.
#[derive(Debug, Clone, Copy)]
struct Frame {
    movement: Vec2,
    run: bool,
    jump: bool,
    release: bool,
}

fn script() -> Vec<Frame> {
    (0..240)
        .map(|tick| Frame {
            movement: match tick {
                0..=59 => Vec2::new(1.0, 0.0),
                60..=79 => Vec2::new(-1.0, 0.0),
                80..=99 => Vec2::ZERO,
                100..=179 => Vec2::new(0.3, 1.0),
                _ => Vec2::new(0.0, -1.0),
            },
            run: (20..60).contains(&tick) || (100..180).contains(&tick),
            jump: tick == 120 || tick == 130,
            release: tick == 124,
        })
        .collect()
}

fn replay() -> (Vec<KinematicSnapshot>, Vec<Option<PlayerState>>) {
    let mut sim: PlayerSim =
        player_sim(grounded_player(Vec3::new(-15.0, 1.0, 0.0)), ledge_world());
    let mut snapshots = Vec::new();
    let mut states = Vec::new();

    for frame in script() {
        let now = sim.clock().time();
        let input = sim.actor_mut().input_mut();
        input.set_movement(frame.movement);
        input.set_run(frame.run);
        if frame.jump {
            input.press_jump(now);
        }
        if frame.release {
            input.release_jump();
        }

        sim.step(DT);
        snapshots.push(sim.actor().entity().snapshot());
        states.push(sim.current_state());
    }
    (snapshots, states)
}

#[test]
fn identical_inputs_replay_identically() {
    let (first_snapshots, first_states) = replay();
    let (second_snapshots, second_states) = replay();

    assert_eq!(first_snapshots, second_snapshots);
    assert_eq!(first_states, second_states);
}

#[test]
fn script_visits_every_state() {
    let (_, states) = replay();
    for key in PlayerState::ALL {
        assert!(states.contains(&Some(key)), "{key} never became active");
    }
}
