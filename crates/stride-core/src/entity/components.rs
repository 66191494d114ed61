//! Plain data carried by an [`Entity`](super::Entity).
//!
//! These records hold tuning and geometry only; all behavior lives on the
//! entity itself.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use sweep::Shape;

use crate::error::ConfigError;

/// Extra probe length below the body when checking for ground.
pub const GROUND_OFFSET: f32 = 0.1;

/// Capsule geometry of a character body.
///
/// Defaults match a two-unit-tall capsule of radius one half.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Body {
    /// Total capsule height.
    pub height: f32,
    /// Capsule radius.
    pub radius: f32,
    /// Offset of the capsule center from the entity position.
    pub center: Vec3,
    /// Tallest step the body treats as walkable ground.
    pub step_offset: f32,
    /// Steepest walkable slope, in degrees.
    pub slope_limit: f32,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            height: 2.0,
            radius: 0.5,
            center: Vec3::ZERO,
            step_offset: 0.3,
            slope_limit: 45.0,
        }
    }
}

impl Body {
    /// Capsule shape used for movement queries.
    #[must_use]
    pub fn shape(&self) -> Shape {
        Shape::capsule(self.radius, self.height)
    }

    /// Checks the dimensions are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBody`] for non-positive height or radius,
    /// a negative or oversized step offset, or a slope limit outside
    /// `(0, 180]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.height.is_nan() || self.height <= 0.0 {
            return Err(ConfigError::InvalidBody(format!(
                "height must be positive, got {}",
                self.height
            )));
        }
        if self.radius.is_nan() || self.radius <= 0.0 {
            return Err(ConfigError::InvalidBody(format!(
                "radius must be positive, got {}",
                self.radius
            )));
        }
        if !(0.0..=self.height).contains(&self.step_offset) {
            return Err(ConfigError::InvalidBody(format!(
                "step offset {} must lie within [0, {}]",
                self.step_offset, self.height
            )));
        }
        if self.slope_limit.is_nan() || self.slope_limit <= 0.0 || self.slope_limit > 180.0 {
            return Err(ConfigError::InvalidBody(format!(
                "slope limit {} must lie within (0, 180]",
                self.slope_limit
            )));
        }
        Ok(())
    }
}

/// Per-entity tuning multipliers.
///
/// External systems (status effects, surfaces, power-ups) scale movement by
/// writing these. All default to `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Multipliers {
    /// Scales the turning drag passed to `accelerate`.
    pub turning_drag: f32,
    /// Scales the top speed passed to `accelerate`.
    pub top_speed: f32,
    /// Scales the acceleration passed to `accelerate`.
    pub acceleration: f32,
    /// Scales the rate passed to `decelerate`.
    pub deceleration: f32,
    /// Scales gravity.
    pub gravity: f32,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            turning_drag: 1.0,
            top_speed: 1.0,
            acceleration: 1.0,
            deceleration: 1.0,
            gravity: 1.0,
        }
    }
}
