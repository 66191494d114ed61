//! Query results.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::collider::{ColliderId, SurfaceTag};

/// First contact reported by a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// Contact point on the collider surface.
    pub point: Vec3,
    /// Surface normal at the contact, pointing away from the collider.
    pub normal: Vec3,
    /// Distance travelled along the sweep before contact.
    pub distance: f32,
    /// Collider that was hit.
    pub collider: ColliderId,
    /// Surface tag of the collider.
    pub tag: SurfaceTag,
    /// Whether the collider is an attachable platform.
    pub platform: bool,
}

impl Hit {
    /// Angle in degrees between the hit normal and `up`.
    #[must_use]
    pub fn slope_angle(&self, up: Vec3) -> f32 {
        self.normal.angle_between(up).to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit_with_normal(normal: Vec3) -> Hit {
        Hit {
            point: Vec3::ZERO,
            normal,
            distance: 0.0,
            collider: ColliderId::new(0),
            tag: SurfaceTag::default(),
            platform: false,
        }
    }

    #[test]
    fn flat_ground_has_zero_slope() {
        assert!(hit_with_normal(Vec3::Y).slope_angle(Vec3::Y).abs() < 1e-3);
    }

    #[test]
    fn wall_is_ninety_degrees() {
        assert!((hit_with_normal(Vec3::X).slope_angle(Vec3::Y) - 90.0).abs() < 1e-3);
    }
}
