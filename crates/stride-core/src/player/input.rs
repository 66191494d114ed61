//! Player input state written by the host and read by the player states.
//!
//! The host polls its devices and writes raw values here once per frame:
//! movement and look axes, the run button, jump press/release edges and the
//! camera yaw. The player reads processed values: dead-zone-remapped and
//! camera-relative directions, and a buffered jump press.
//!
//! Times passed in are simulation seconds (see
//! [`Clock::time`](crate::clock::Clock::time)).

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Input processing settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Per-axis dead zone in `[0, 1)`.
    pub dead_zone: f32,
    /// Seconds a jump press stays usable.
    pub jump_buffer: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dead_zone: 0.125,
            jump_buffer: 0.15,
        }
    }
}

impl InputConfig {
    /// Checks the dead zone and buffer are in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidInput`] when out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.dead_zone) {
            return Err(ConfigError::InvalidInput(format!(
                "dead_zone must lie within [0, 1), got {}",
                self.dead_zone
            )));
        }
        if self.jump_buffer.is_nan() || self.jump_buffer < 0.0 {
            return Err(ConfigError::InvalidInput(format!(
                "jump_buffer must be non-negative, got {}",
                self.jump_buffer
            )));
        }
        Ok(())
    }
}

/// Kind of device driving the look axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputDevice {
    /// Mouse or touch: look deltas are already per-frame.
    #[default]
    Pointer,
    /// Gamepad stick: look values are rates.
    Stick,
}

/// Per-player input state.
#[derive(Debug, Clone, Default)]
pub struct PlayerInput {
    config: InputConfig,
    movement: Vec2,
    run: bool,
    look: Vec2,
    device: InputDevice,
    camera_yaw: f32,
    last_jump_press: Option<f32>,
    jump_released: bool,
    movement_unlock_time: f32,
}

impl PlayerInput {
    /// Creates idle input with the given settings.
    #[must_use]
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Processing settings.
    #[must_use]
    pub const fn config(&self) -> &InputConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Host writes
    // -------------------------------------------------------------------------

    /// Sets the raw movement axis (x right, y forward).
    pub fn set_movement(&mut self, axis: Vec2) {
        self.movement = axis;
    }

    /// Sets whether run is held.
    pub fn set_run(&mut self, run: bool) {
        self.run = run;
    }

    /// Sets the raw look axis and the device producing it.
    pub fn set_look(&mut self, axis: Vec2, device: InputDevice) {
        self.look = axis;
        self.device = device;
    }

    /// Sets the camera yaw in degrees, used for camera-relative movement.
    pub fn set_camera_yaw(&mut self, degrees: f32) {
        self.camera_yaw = degrees;
    }

    /// Records a jump press at `now`.
    pub fn press_jump(&mut self, now: f32) {
        self.last_jump_press = Some(now);
    }

    /// Records a jump release this frame.
    pub fn release_jump(&mut self) {
        self.jump_released = true;
    }

    /// Ignores movement input until `now + duration`.
    pub fn lock_movement_direction(&mut self, now: f32, duration: f32) {
        self.movement_unlock_time = now + duration.max(0.0);
    }

    /// Clears per-frame edges. Called once at the end of every tick.
    pub fn end_frame(&mut self) {
        self.jump_released = false;
    }

    // -------------------------------------------------------------------------
    // Player reads
    // -------------------------------------------------------------------------

    /// Raw movement axis.
    #[must_use]
    pub const fn movement(&self) -> Vec2 {
        self.movement
    }

    /// Returns `true` while run is held.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.run
    }

    /// Dead-zone-remapped movement on the x/z plane, or zero while locked.
    #[must_use]
    pub fn movement_direction(&self, now: f32) -> Vec3 {
        if now < self.movement_unlock_time {
            return Vec3::ZERO;
        }
        self.axis_with_cross_dead_zone(self.movement)
    }

    /// Applies the dead zone to each axis separately and maps `(x, y)` to
    /// `(x, 0, y)`.
    ///
    /// Values inside the dead zone become zero; values outside are rescaled
    /// so the live range still spans `0..=1`.
    #[must_use]
    pub fn axis_with_cross_dead_zone(&self, axis: Vec2) -> Vec3 {
        let dz = self.config.dead_zone;
        let remap = |v: f32| {
            if v.abs() > dz {
                v.signum() * (v.abs() - dz) / (1.0 - dz)
            } else {
                0.0
            }
        };
        Vec3::new(remap(axis.x), 0.0, remap(axis.y))
    }

    /// Movement direction rotated by the camera yaw and normalized.
    #[must_use]
    pub fn movement_camera_direction(&self, now: f32) -> Vec3 {
        let direction = self.movement_direction(now);
        if direction.length_squared() > 0.0 {
            let rotation = Quat::from_rotation_y(self.camera_yaw.to_radians());
            (rotation * direction).normalize_or_zero()
        } else {
            direction
        }
    }

    /// Consumes a buffered jump press made within the buffer window.
    ///
    /// Returns `true` at most once per press. Expired presses are dropped.
    pub fn take_jump_down(&mut self, now: f32) -> bool {
        match self.last_jump_press.take() {
            Some(pressed) if now - pressed <= self.config.jump_buffer => true,
            _ => false,
        }
    }

    /// Returns `true` if a press is still waiting within the window.
    #[must_use]
    pub fn has_buffered_jump(&self, now: f32) -> bool {
        self.last_jump_press
            .is_some_and(|pressed| now - pressed <= self.config.jump_buffer)
    }

    /// Returns `true` on the frame jump was released.
    #[must_use]
    pub const fn jump_released(&self) -> bool {
        self.jump_released
    }

    /// Dead-zone-remapped look axis on the x/z plane.
    #[must_use]
    pub fn look_direction(&self) -> Vec3 {
        self.axis_with_cross_dead_zone(self.look)
    }

    /// Returns `true` when the look axis comes from a pointer device.
    #[must_use]
    pub fn is_looking_with_pointer(&self) -> bool {
        self.device == InputDevice::Pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> PlayerInput {
        PlayerInput::new(InputConfig::default())
    }

    mod dead_zone_tests {
        use super::*;

        #[test]
        fn inside_dead_zone_is_zero() {
            let i = input();
            assert_eq!(i.axis_with_cross_dead_zone(Vec2::new(0.1, -0.12)), Vec3::ZERO);
        }

        #[test]
        fn full_deflection_stays_one() {
            let i = input();
            let v = i.axis_with_cross_dead_zone(Vec2::new(1.0, -1.0));
            assert!((v.x - 1.0).abs() < 1e-6);
            assert!((v.z + 1.0).abs() < 1e-6);
            assert!(v.y.abs() < f32::EPSILON);
        }

        #[test]
        fn axes_are_remapped_independently() {
            let i = input();
            let v = i.axis_with_cross_dead_zone(Vec2::new(0.5625, 0.05));
            assert!((v.x - 0.5).abs() < 1e-6);
            assert!(v.z.abs() < f32::EPSILON);
        }

        #[test]
        fn negative_values_mirror_positive() {
            let i = input();
            let pos = i.axis_with_cross_dead_zone(Vec2::new(0.6, 0.0));
            let neg = i.axis_with_cross_dead_zone(Vec2::new(-0.6, 0.0));
            assert!((pos.x + neg.x).abs() < 1e-6);
        }
    }

    mod direction_tests {
        use super::*;

        #[test]
        fn camera_yaw_rotates_forward() {
            let mut i = input();
            i.set_movement(Vec2::new(0.0, 1.0));
            i.set_camera_yaw(90.0);
            let d = i.movement_camera_direction(0.0);
            assert!(d.distance(Vec3::X) < 1e-5);
        }

        #[test]
        fn camera_direction_is_normalized() {
            let mut i = input();
            i.set_movement(Vec2::new(0.4, 0.4));
            let d = i.movement_camera_direction(0.0);
            assert!((d.length() - 1.0).abs() < 1e-5);
        }

        #[test]
        fn lock_suppresses_movement() {
            let mut i = input();
            i.set_movement(Vec2::new(1.0, 0.0));
            i.lock_movement_direction(1.0, 0.5);
            assert_eq!(i.movement_direction(1.2), Vec3::ZERO);
            assert_eq!(i.movement_camera_direction(1.2), Vec3::ZERO);
            assert!(i.movement_direction(1.5).x > 0.0);
        }

        #[test]
        fn look_direction_and_device() {
            let mut i = input();
            i.set_look(Vec2::new(1.0, 0.0), InputDevice::Stick);
            assert!(!i.is_looking_with_pointer());
            assert!((i.look_direction().x - 1.0).abs() < 1e-6);
        }
    }

    mod jump_tests {
        use super::*;

        #[test]
        fn press_is_consumed_once() {
            let mut i = input();
            i.press_jump(1.0);
            assert!(i.take_jump_down(1.05));
            assert!(!i.take_jump_down(1.06));
        }

        #[test]
        fn press_expires_after_buffer() {
            let mut i = input();
            i.press_jump(1.0);
            assert!(i.has_buffered_jump(1.1));
            assert!(!i.has_buffered_jump(1.2));
            assert!(!i.take_jump_down(1.2));
        }

        #[test]
        fn release_lasts_one_frame() {
            let mut i = input();
            i.release_jump();
            assert!(i.jump_released());
            i.end_frame();
            assert!(!i.jump_released());
        }
    }

    #[test]
    fn config_rejects_full_dead_zone() {
        let config = InputConfig {
            dead_zone: 1.0,
            ..InputConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidInput(_))));
    }
}
