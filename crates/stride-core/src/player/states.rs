//! Player behavior states.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Player;
use crate::state::{Actor, EntityState, StateContext};

/// Keys of the player states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerState {
    /// Standing still on the ground.
    Idle,
    /// Moving on the ground under input.
    Walk,
    /// Airborne, rising or falling.
    Fall,
    /// Stopping after reversing against the current motion.
    Brake,
}

impl PlayerState {
    /// Every state, `Idle` first.
    pub const ALL: [Self; 4] = [Self::Idle, Self::Walk, Self::Fall, Self::Brake];
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Walk => write!(f, "Walk"),
            Self::Fall => write!(f, "Fall"),
            Self::Brake => write!(f, "Brake"),
        }
    }
}

/// Builds the behavior for `key`.
pub(crate) fn create(key: PlayerState) -> Box<dyn EntityState<Player>> {
    match key {
        PlayerState::Idle => Box::new(Idle),
        PlayerState::Walk => Box::new(Walk),
        PlayerState::Fall => Box::new(Fall),
        PlayerState::Brake => Box::new(Brake),
    }
}

/// Gravity, jump and fall checks, friction; walks once there is input or
/// leftover lateral motion.
#[derive(Debug)]
pub struct Idle;

impl EntityState<Player> for Idle {
    fn on_step(&mut self, player: &mut Player, ctx: &mut StateContext<PlayerState>) {
        player.gravity();
        player.jump(ctx);
        player.fall(ctx);
        player.friction();

        if ctx.has_pending() {
            return;
        }

        let input = player.input().movement_direction(ctx.time());
        if input.length_squared() > 0.0 || player.entity().lateral_velocity().length_squared() > 0.0
        {
            ctx.change(PlayerState::Walk);
        }
    }
}

/// Ground movement toward the camera-relative input.
///
/// Input pointing against the current motion (dot product below the brake
/// threshold) switches to [`Brake`]. Without input the player slides to a
/// stop under friction and goes idle.
#[derive(Debug)]
pub struct Walk;

impl EntityState<Player> for Walk {
    fn on_step(&mut self, player: &mut Player, ctx: &mut StateContext<PlayerState>) {
        player.gravity();
        player.jump(ctx);
        player.fall(ctx);

        if ctx.has_pending() {
            return;
        }

        let input = player.input().movement_camera_direction(ctx.time());
        if input.length_squared() > 0.0 {
            let lateral = player.entity().lateral_velocity();
            if input.dot(lateral) >= player.stats().current().brake_threshold {
                player.accelerate(input);
                let lateral = player.entity().lateral_velocity();
                player.face_direction_smooth(lateral);
            } else {
                ctx.change(PlayerState::Brake);
            }
        } else {
            player.friction();
            if player.entity().lateral_velocity().length_squared() <= 0.0 {
                ctx.change(PlayerState::Idle);
            }
        }
    }
}

/// Airborne: gravity, air control, extra jumps; idles on landing.
#[derive(Debug)]
pub struct Fall;

impl EntityState<Player> for Fall {
    fn on_step(&mut self, player: &mut Player, ctx: &mut StateContext<PlayerState>) {
        player.gravity();
        player.jump(ctx);

        let input = player.input().movement_camera_direction(ctx.time());
        if input.length_squared() > 0.0 {
            player.accelerate(input);
        }
        let lateral = player.entity().lateral_velocity();
        player.face_direction_smooth(lateral);

        if player.entity().is_grounded() && !ctx.has_pending() {
            ctx.change(PlayerState::Idle);
        }
    }
}

/// Decelerates to a full stop, then idles.
#[derive(Debug)]
pub struct Brake;

impl EntityState<Player> for Brake {
    fn on_step(&mut self, player: &mut Player, ctx: &mut StateContext<PlayerState>) {
        player.decelerate();

        if player.entity().lateral_velocity().length_squared() == 0.0 {
            ctx.change(PlayerState::Idle);
        }
    }
}
