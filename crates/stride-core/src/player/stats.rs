//! Player tuning values and the switchable set that holds them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Movement, gravity and jump tuning for a player.
///
/// Speeds are units per second, accelerations units per second squared,
/// rotation degrees per second. Jump "heights" are the initial (max) and
/// release-clamped (min) upward speeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    // General
    /// Facing turn rate.
    pub rotation_speed: f32,
    /// Lateral deceleration when idle without input.
    pub friction: f32,
    /// Terminal fall speed.
    pub gravity_top_speed: f32,
    /// Gravity while ascending.
    pub gravity: f32,
    /// Gravity while descending.
    pub fall_gravity: f32,

    // Motion
    /// Input/velocity alignment (cosine) below which walking turns into a brake.
    pub brake_threshold: f32,
    /// Decay rate of the velocity component off the input direction.
    pub turning_drag: f32,
    /// Ground acceleration.
    pub acceleration: f32,
    /// Walking top speed.
    pub top_speed: f32,
    /// Acceleration while airborne.
    pub air_acceleration: f32,
    /// Brake deceleration.
    pub deceleration: f32,

    // Running
    /// Ground acceleration while running.
    pub running_acceleration: f32,
    /// Top speed while running.
    pub running_top_speed: f32,
    /// Turning drag while running on the ground.
    pub running_turning_drag: f32,

    // Jump
    /// Extra jumps allowed after the first.
    pub multi_jumps: u32,
    /// Seconds after leaving the ground during which a jump is still allowed.
    pub coyote_jump_threshold: f32,
    /// Upward speed of a jump.
    pub max_jump_height: f32,
    /// Upward speed a released jump is clamped to.
    pub min_jump_height: f32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            rotation_speed: 940.0,
            friction: 16.0,
            gravity_top_speed: 50.0,
            gravity: 50.0,
            fall_gravity: 65.0,

            brake_threshold: -0.8,
            turning_drag: 28.0,
            acceleration: 13.0,
            top_speed: 6.0,
            air_acceleration: 32.0,
            deceleration: 28.0,

            running_acceleration: 16.0,
            running_top_speed: 7.5,
            running_turning_drag: 14.0,

            multi_jumps: 1,
            coyote_jump_threshold: 0.15,
            max_jump_height: 17.0,
            min_jump_height: 10.0,
        }
    }
}

impl PlayerStats {
    /// Checks every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStats`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("rotation_speed", self.rotation_speed),
            ("friction", self.friction),
            ("gravity", self.gravity),
            ("fall_gravity", self.fall_gravity),
            ("turning_drag", self.turning_drag),
            ("acceleration", self.acceleration),
            ("air_acceleration", self.air_acceleration),
            ("deceleration", self.deceleration),
            ("running_acceleration", self.running_acceleration),
            ("running_turning_drag", self.running_turning_drag),
            ("coyote_jump_threshold", self.coyote_jump_threshold),
            ("min_jump_height", self.min_jump_height),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::InvalidStats(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        let positive = [
            ("gravity_top_speed", self.gravity_top_speed),
            ("top_speed", self.top_speed),
            ("running_top_speed", self.running_top_speed),
            ("max_jump_height", self.max_jump_height),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::InvalidStats(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if !(-1.0..=1.0).contains(&self.brake_threshold) {
            return Err(ConfigError::InvalidStats(format!(
                "brake_threshold must lie within [-1, 1], got {}",
                self.brake_threshold
            )));
        }
        if self.min_jump_height > self.max_jump_height {
            return Err(ConfigError::InvalidStats(format!(
                "min_jump_height {} exceeds max_jump_height {}",
                self.min_jump_height, self.max_jump_height
            )));
        }
        Ok(())
    }
}

/// Ordered stat sets with one selected.
///
/// Switching sets (power-ups, surfaces, debug tuning) never touches the
/// entity's multipliers.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsManager {
    sets: Vec<PlayerStats>,
    current: usize,
}

impl Default for StatsManager {
    fn default() -> Self {
        Self {
            sets: vec![PlayerStats::default()],
            current: 0,
        }
    }
}

impl StatsManager {
    /// Creates a manager selecting the first set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyStatSets`] for an empty list, or the first
    /// validation error of any set.
    pub fn new(sets: Vec<PlayerStats>) -> Result<Self, ConfigError> {
        if sets.is_empty() {
            return Err(ConfigError::EmptyStatSets);
        }
        for stats in &sets {
            stats.validate()?;
        }
        Ok(Self { sets, current: 0 })
    }

    /// The selected set.
    #[must_use]
    pub fn current(&self) -> &PlayerStats {
        &self.sets[self.current]
    }

    /// Index of the selected set.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.current
    }

    /// Selects set `index`. Returns `false` (and keeps the selection) when out
    /// of range.
    pub fn change(&mut self, index: usize) -> bool {
        if index >= self.sets.len() {
            return false;
        }
        debug!(target: "stride::player", from = self.current, to = index, "stat set change");
        self.current = index;
        true
    }

    /// All sets.
    #[must_use]
    pub fn sets(&self) -> &[PlayerStats] {
        &self.sets
    }

    /// Number of sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Always `false`: a manager holds at least one set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
