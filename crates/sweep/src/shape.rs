//! Body shapes that can be swept through the world.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Convex shape swept by queries.
///
/// Both shapes are centered on the query origin. The capsule is vertical:
/// half its height extends above and below the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// A sphere.
    Sphere {
        /// Sphere radius.
        radius: f32,
    },
    /// A vertical capsule (cylinder with hemisphere caps).
    Capsule {
        /// Radius of the cylinder and caps.
        radius: f32,
        /// Total height from the bottom of the lower cap to the top of the upper cap.
        height: f32,
    },
}

impl Shape {
    /// Creates a sphere.
    #[must_use]
    pub const fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Creates a vertical capsule.
    #[must_use]
    pub const fn capsule(radius: f32, height: f32) -> Self {
        Self::Capsule { radius, height }
    }

    /// Radius of the shape's rounded part.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        match *self {
            Self::Sphere { radius } | Self::Capsule { radius, .. } => radius,
        }
    }

    /// Distance between the origin and a cap center; zero for spheres.
    #[must_use]
    pub fn half_segment(&self) -> f32 {
        match *self {
            Self::Sphere { .. } => 0.0,
            Self::Capsule { radius, height } => (height * 0.5 - radius).max(0.0),
        }
    }

    /// Furthest extent of the shape along the unit direction `n`.
    #[must_use]
    pub fn support(&self, n: Vec3) -> f32 {
        self.radius() + self.half_segment() * n.y.abs()
    }

    /// Half extents of the shape's bounding box.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        let r = self.radius();
        Vec3::new(r, r + self.half_segment(), r)
    }

    /// Point of the shape that touches a surface with outward normal `normal`
    /// when the shape is centered at `center`.
    #[must_use]
    pub fn contact_point(&self, center: Vec3, normal: Vec3) -> Vec3 {
        let cap = if normal.y > 0.0 {
            -self.half_segment()
        } else if normal.y < 0.0 {
            self.half_segment()
        } else {
            0.0
        };
        center + Vec3::Y * cap - normal * self.radius()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_support_is_radius() {
        let s = Shape::sphere(0.5);
        assert!((s.support(Vec3::Y) - 0.5).abs() < f32::EPSILON);
        assert!((s.support(Vec3::X) - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn capsule_support_depends_on_axis() {
        let c = Shape::capsule(0.5, 2.0);
        assert!((c.support(Vec3::Y) - 1.0).abs() < 1e-6);
        assert!((c.support(Vec3::NEG_Y) - 1.0).abs() < 1e-6);
        assert!((c.support(Vec3::X) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn squat_capsule_degenerates_to_sphere() {
        let c = Shape::capsule(1.0, 1.0);
        assert!(c.half_segment().abs() < f32::EPSILON);
        assert_eq!(c.half_extents(), Vec3::splat(1.0));
    }

    #[test]
    fn contact_point_on_floor_is_capsule_bottom() {
        let c = Shape::capsule(0.5, 2.0);
        let p = c.contact_point(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        assert!(p.distance(Vec3::ZERO) < 1e-6);
    }
}
