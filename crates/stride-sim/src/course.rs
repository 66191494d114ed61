//! The test course and the scripted input timeline played on it.

use glam::{Vec2, Vec3};
use stride_core::player::PlayerInput;
use sweep::{Collider, StaticWorld};

/// Where the player spawns: standing on the upper deck.
pub const SPAWN: Vec3 = Vec3::new(-15.0, 1.0, 0.0);

/// Builds the course: an upper deck ending in a ledge at x = 0, a moving
/// lift beside it and a floor six units below.
pub fn build() -> StaticWorld {
    let mut world = StaticWorld::new();
    world.add(
        Collider::aabb(Vec3::new(-10.0, -0.5, 0.0), Vec3::new(10.0, 0.5, 10.0)).with_tag("Deck"),
    );
    world.add(Collider::ground(-6.0).with_tag("Floor"));
    world.add(
        Collider::aabb(Vec3::new(12.0, -4.0, 0.0), Vec3::new(2.0, 0.25, 2.0))
            .with_tag("Lift")
            .as_platform(),
    );
    world
}

/// One scripted input change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Sets the movement axis.
    Move(Vec2),
    /// Holds or releases run.
    Run(bool),
    /// Presses jump.
    Press,
    /// Releases jump.
    Release,
    /// Turns the camera to a yaw in degrees.
    Yaw(f32),
}

/// An action fired once the clock reaches `at` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    /// Simulation time in seconds.
    pub at: f32,
    /// What to do.
    pub action: Action,
}

const fn cue(at: f32, action: Action) -> Cue {
    Cue { at, action }
}

/// The default run: walk, short hop, brake, walk off the ledge, double jump
/// on the floor below.
pub fn timeline() -> Vec<Cue> {
    vec![
        cue(0.0, Action::Move(Vec2::new(1.0, 0.0))),
        cue(1.0, Action::Run(true)),
        cue(1.5, Action::Press),
        cue(1.6, Action::Release),
        cue(2.5, Action::Move(Vec2::new(-1.0, 0.0))),
        cue(3.2, Action::Move(Vec2::new(1.0, 0.0))),
        cue(3.2, Action::Run(false)),
        cue(7.0, Action::Move(Vec2::ZERO)),
        cue(7.5, Action::Press),
        cue(7.8, Action::Release),
        cue(7.9, Action::Press),
        cue(9.0, Action::Yaw(90.0)),
        cue(9.0, Action::Move(Vec2::new(0.0, 1.0))),
        cue(10.0, Action::Move(Vec2::ZERO)),
    ]
}

/// Plays cues in time order.
#[derive(Debug)]
pub struct Script {
    cues: Vec<Cue>,
    next: usize,
}

impl Script {
    /// Creates a script; cues are sorted by time.
    pub fn new(mut cues: Vec<Cue>) -> Self {
        cues.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { cues, next: 0 }
    }

    /// Applies every cue due at `now`. Returns how many fired.
    pub fn apply(&mut self, now: f32, input: &mut PlayerInput) -> usize {
        let start = self.next;
        while let Some(cue) = self.cues.get(self.next) {
            if cue.at > now {
                break;
            }
            match cue.action {
                Action::Move(axis) => input.set_movement(axis),
                Action::Run(run) => input.set_run(run),
                Action::Press => input.press_jump(now),
                Action::Release => input.release_jump(),
                Action::Yaw(degrees) => input.set_camera_yaw(degrees),
            }
            tracing::debug!(target: "stride::sim", at = cue.at, action = ?cue.action, "cue");
            self.next += 1;
        }
        self.next - start
    }

    /// True once every cue has fired.
    pub fn is_finished(&self) -> bool {
        self.next >= self.cues.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cues_fire_in_time_order() {
        let mut script = Script::new(vec![
            cue(0.5, Action::Run(true)),
            cue(0.0, Action::Move(Vec2::X)),
        ]);
        let mut input = PlayerInput::default();

        assert_eq!(script.apply(0.0, &mut input), 1);
        assert_eq!(input.movement(), Vec2::X);
        assert!(!input.is_running());

        assert_eq!(script.apply(0.4, &mut input), 0);
        assert_eq!(script.apply(0.6, &mut input), 1);
        assert!(input.is_running());
        assert!(script.is_finished());
    }

    #[test]
    fn course_has_deck_floor_and_lift() {
        let world = build();
        assert_eq!(world.len(), 3);
        assert!(world.colliders().any(|(_, c)| c.platform));
    }
}
