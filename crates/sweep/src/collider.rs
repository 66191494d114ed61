//! Static colliders and their per-shape sweep math.
//!
//! Boxes are tested against the body's bounding box (a box expanded by the
//! body's half extents), so rounded capsule edges are treated as square
//! corners. Planes use the exact support distance of the swept shape.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::layer::LayerMask;
use crate::shape::Shape;

/// Unique identifier for a collider within a world.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColliderId(u32);

impl ColliderId {
    /// Creates a new `ColliderId` from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value of this identifier.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ColliderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColliderId({})", self.0)
    }
}

impl fmt::Display for ColliderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ColliderId {
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

/// Free-form surface tag ("Ground", "Ice", "Platform", ...).
///
/// Tags are opaque to the collision code; gameplay reads them from hits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceTag(String);

impl SurfaceTag {
    /// Creates a new tag.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self(tag.to_string())
    }

    /// Returns the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the empty tag.
    #[must_use]
    pub fn is_untagged(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SurfaceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SurfaceTag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Collider geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderKind {
    /// Solid half-space below the plane `dot(normal, p) = offset`.
    Plane {
        /// Unit normal pointing out of the solid side.
        normal: Vec3,
        /// Plane offset along `normal`.
        offset: f32,
    },
    /// Axis-aligned box.
    Box {
        /// Box center.
        center: Vec3,
        /// Half size along each axis.
        half_extents: Vec3,
    },
}

/// A static collider with layer, tag and platform flag.
///
/// # Example
///
/// ```
/// use glam::Vec3;
/// use sweep::{Collider, LayerMask};
///
/// let ledge = Collider::aabb(Vec3::new(0.0, 1.0, 0.0), Vec3::new(2.0, 1.0, 2.0))
///     .with_layer(LayerMask::TERRAIN)
///     .with_tag("Ledge");
///
/// assert_eq!(ledge.tag.as_str(), "Ledge");
/// assert!(!ledge.platform);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    /// Geometry.
    pub kind: ColliderKind,
    /// Layer this collider lives on.
    pub layer: LayerMask,
    /// Surface tag reported in hits.
    pub tag: SurfaceTag,
    /// Whether bodies landing here should attach to it.
    pub platform: bool,
}

impl Collider {
    /// Creates a collider on the default layer with no tag.
    #[must_use]
    pub fn new(kind: ColliderKind) -> Self {
        Self {
            kind,
            layer: LayerMask::DEFAULT,
            tag: SurfaceTag::default(),
            platform: false,
        }
    }

    /// Creates a half-space collider. `normal` is normalized; a zero normal
    /// falls back to world up.
    #[must_use]
    pub fn plane(normal: Vec3, offset: f32) -> Self {
        let n = normal.normalize_or_zero();
        let normal = if n == Vec3::ZERO { Vec3::Y } else { n };
        Self::new(ColliderKind::Plane { normal, offset })
    }

    /// Creates a flat floor at height `y`.
    #[must_use]
    pub fn ground(y: f32) -> Self {
        Self::plane(Vec3::Y, y).with_layer(LayerMask::TERRAIN)
    }

    /// Creates an axis-aligned box.
    #[must_use]
    pub fn aabb(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(ColliderKind::Box {
            center,
            half_extents: half_extents.abs(),
        })
    }

    /// Sets the layer.
    #[must_use]
    pub fn with_layer(mut self, layer: LayerMask) -> Self {
        self.layer = layer;
        self
    }

    /// Sets the surface tag.
    #[must_use]
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = SurfaceTag::new(tag);
        self
    }

    /// Marks the collider as an attachable platform on the platform layer.
    #[must_use]
    pub fn as_platform(mut self) -> Self {
        self.platform = true;
        self.layer = LayerMask::PLATFORM;
        self
    }

    /// Sweeps `shape` from `origin` along unit `direction` up to `max_distance`.
    ///
    /// Returns `(distance, normal, point)` of the first contact. Shapes that
    /// already overlap the collider at `origin` report no hit.
    #[must_use]
    pub fn sweep(
        &self,
        shape: &Shape,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<(f32, Vec3, Vec3)> {
        match self.kind {
            ColliderKind::Plane { normal, offset } => {
                let denom = normal.dot(direction);
                if denom >= -1e-8 {
                    return None;
                }
                let gap = normal.dot(origin) - offset - shape.support(normal);
                if gap < 0.0 {
                    return None;
                }
                let t = gap / -denom;
                if t > max_distance {
                    return None;
                }
                let point = shape.contact_point(origin + direction * t, normal);
                Some((t, normal, point))
            }
            ColliderKind::Box {
                center,
                half_extents,
            } => {
                let expanded = half_extents + shape.half_extents();
                let min = center - expanded;
                let max = center + expanded;
                if origin.cmpgt(min).all() && origin.cmplt(max).all() {
                    return None;
                }

                let mut t_enter = f32::NEG_INFINITY;
                let mut t_exit = f32::INFINITY;
                let mut axis = None;
                for i in 0..3 {
                    if direction[i].abs() < 1e-8 {
                        if origin[i] < min[i] || origin[i] > max[i] {
                            return None;
                        }
                        continue;
                    }
                    let inv = 1.0 / direction[i];
                    let t1 = (min[i] - origin[i]) * inv;
                    let t2 = (max[i] - origin[i]) * inv;
                    let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
                    if near > t_enter {
                        t_enter = near;
                        axis = Some(i);
                    }
                    t_exit = t_exit.min(far);
                    if t_enter > t_exit {
                        return None;
                    }
                }

                let axis = axis?;
                if t_enter < 0.0 || t_enter > max_distance {
                    return None;
                }
                let mut normal = Vec3::ZERO;
                normal[axis] = -direction[axis].signum();
                let at = origin + direction * t_enter;
                let point = at.clamp(center - half_extents, center + half_extents);
                Some((t_enter, normal, point))
            }
        }
    }

    /// Minimum translation that moves `shape` centered at `center` out of
    /// this collider, or `None` if they do not overlap.
    #[must_use]
    pub fn penetration(&self, shape: &Shape, center: Vec3) -> Option<Vec3> {
        match self.kind {
            ColliderKind::Plane { normal, offset } => {
                let gap = normal.dot(center) - offset - shape.support(normal);
                (gap < 0.0).then(|| normal * -gap)
            }
            ColliderKind::Box {
                center: box_center,
                half_extents,
            } => {
                let expanded = half_extents + shape.half_extents();
                let min = box_center - expanded;
                let max = box_center + expanded;
                if !(center.cmpgt(min).all() && center.cmplt(max).all()) {
                    return None;
                }
                let mut best = Vec3::ZERO;
                let mut best_depth = f32::INFINITY;
                for i in 0..3 {
                    let below = center[i] - min[i];
                    let above = max[i] - center[i];
                    if below < best_depth {
                        best_depth = below;
                        best = Vec3::ZERO;
                        best[i] = -below;
                    }
                    if above < best_depth {
                        best_depth = above;
                        best = Vec3::ZERO;
                        best[i] = above;
                    }
                }
                Some(best)
            }
        }
    }
}
