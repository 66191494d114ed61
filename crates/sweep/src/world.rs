//! The collision query interface and a reference static world.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::collider::{Collider, ColliderId, ColliderKind};
use crate::hit::Hit;
use crate::layer::LayerMask;
use crate::shape::Shape;
use crate::NEAR_ZERO_SQ;

/// Gap kept between a moved body and the surfaces it rests against.
pub const DEFAULT_SKIN_WIDTH: f32 = 0.005;

/// Maximum number of slide iterations in a single move.
const MAX_SLIDES: usize = 4;

/// Collision queries a character controller needs from the world.
///
/// Implementations are queried synchronously from inside a simulation tick
/// and are read-only during that tick.
pub trait CollisionWorld {
    /// Sweeps a sphere of `radius` from `origin` along `direction` for at most
    /// `max_distance` and returns the closest hit on a collider visible to
    /// `mask`.
    ///
    /// Colliders the sphere already overlaps at `origin` are ignored. A
    /// near-zero `direction` never hits.
    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<Hit>;

    /// Moves `shape` from `position` by `displacement`, resolving penetration
    /// and sliding along blocking surfaces.
    ///
    /// Returns the displacement that was actually applied.
    fn move_body(&self, shape: &Shape, position: Vec3, displacement: Vec3, mask: LayerMask)
        -> Vec3;
}

/// A world made of static planes and boxes.
///
/// # Example
///
/// ```
/// use glam::Vec3;
/// use sweep::{Collider, CollisionWorld, LayerMask, Shape, StaticWorld};
///
/// let mut world = StaticWorld::new();
/// world.add(Collider::ground(0.0));
///
/// // A capsule standing on the floor cannot be pushed through it.
/// let body = Shape::capsule(0.5, 2.0);
/// let applied = world.move_body(
///     &body,
///     Vec3::new(0.0, 1.5, 0.0),
///     Vec3::new(0.0, -2.0, 0.0),
///     LayerMask::QUERY_DEFAULT,
/// );
/// assert!(applied.y > -0.51 && applied.y < -0.49);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticWorld {
    colliders: Vec<(ColliderId, Collider)>,
    next_id: u32,
    skin_width: f32,
}

impl Default for StaticWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticWorld {
    /// Creates an empty world with the default skin width.
    #[must_use]
    pub fn new() -> Self {
        Self::with_skin_width(DEFAULT_SKIN_WIDTH)
    }

    /// Creates an empty world with a custom skin width.
    #[must_use]
    pub fn with_skin_width(skin_width: f32) -> Self {
        Self {
            colliders: Vec::new(),
            next_id: 0,
            skin_width: skin_width.max(0.0),
        }
    }

    /// Returns the skin width.
    #[must_use]
    pub fn skin_width(&self) -> f32 {
        self.skin_width
    }

    /// Adds a collider and returns its id. Ids are assigned sequentially.
    pub fn add(&mut self, collider: Collider) -> ColliderId {
        let id = ColliderId::new(self.next_id);
        self.next_id += 1;
        self.colliders.push((id, collider));
        id
    }

    /// Removes a collider, returning it if it existed.
    pub fn remove(&mut self, id: ColliderId) -> Option<Collider> {
        let index = self.colliders.iter().position(|(cid, _)| *cid == id)?;
        Some(self.colliders.remove(index).1)
    }

    /// Returns a collider by id.
    #[must_use]
    pub fn get(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders
            .iter()
            .find(|(cid, _)| *cid == id)
            .map(|(_, c)| c)
    }

    /// Moves a box collider to a new center. Returns `false` if the id is
    /// unknown or the collider is not a box.
    pub fn set_box_center(&mut self, id: ColliderId, new_center: Vec3) -> bool {
        let Some((_, collider)) = self.colliders.iter_mut().find(|(cid, _)| *cid == id) else {
            return false;
        };
        match &mut collider.kind {
            ColliderKind::Box { center, .. } => {
                *center = new_center;
                true
            }
            ColliderKind::Plane { .. } => false,
        }
    }

    /// Iterates over colliders in insertion order.
    pub fn colliders(&self) -> impl Iterator<Item = (ColliderId, &Collider)> + '_ {
        self.colliders.iter().map(|(id, c)| (*id, c))
    }

    /// Number of colliders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Returns `true` if the world has no colliders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Sweeps an arbitrary shape and returns the closest hit.
    ///
    /// Ties are broken by insertion order.
    #[must_use]
    pub fn sweep(
        &self,
        shape: &Shape,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<Hit> {
        if direction.length_squared() < NEAR_ZERO_SQ {
            return None;
        }
        let direction = direction.normalize();

        let mut best: Option<Hit> = None;
        for (id, collider) in &self.colliders {
            if !mask.sees(collider.layer) {
                continue;
            }
            let Some((distance, normal, point)) =
                collider.sweep(shape, origin, direction, max_distance)
            else {
                continue;
            };
            if best.as_ref().is_some_and(|b| b.distance <= distance) {
                continue;
            }
            best = Some(Hit {
                point,
                normal,
                distance,
                collider: *id,
                tag: collider.tag.clone(),
                platform: collider.platform,
            });
        }
        best
    }

    /// Pushes `shape` out of every collider it overlaps, one pass in
    /// insertion order. Returns the total correction.
    #[must_use]
    pub fn depenetrate(&self, shape: &Shape, position: Vec3, mask: LayerMask) -> Vec3 {
        let mut center = position;
        for (_, collider) in &self.colliders {
            if !mask.sees(collider.layer) {
                continue;
            }
            if let Some(push) = collider.penetration(shape, center) {
                let len = push.length();
                let correction = if len > 0.0 {
                    push + push / len * self.skin_width
                } else {
                    push
                };
                center += correction;
            }
        }
        center - position
    }
}

impl CollisionWorld for StaticWorld {
    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<Hit> {
        self.sweep(&Shape::sphere(radius), origin, direction, max_distance, mask)
    }

    fn move_body(
        &self,
        shape: &Shape,
        position: Vec3,
        displacement: Vec3,
        mask: LayerMask,
    ) -> Vec3 {
        let mut center = position + self.depenetrate(shape, position, mask);
        let mut remaining = displacement;

        for _ in 0..MAX_SLIDES {
            let len_sq = remaining.length_squared();
            if len_sq < NEAR_ZERO_SQ {
                break;
            }
            let len = len_sq.sqrt();
            let direction = remaining / len;

            let Some(hit) = self.sweep(shape, center, direction, len + self.skin_width, mask)
            else {
                center += remaining;
                break;
            };

            let travel = (hit.distance - self.skin_width).max(0.0);
            center += direction * travel;

            let mut leftover = remaining - direction * travel;
            let into = leftover.dot(hit.normal);
            if into < 0.0 {
                leftover -= hit.normal * into;
            }
            trace!(
                target: "sweep::move",
                collider = %hit.collider,
                travel,
                "slide"
            );
            remaining = leftover;
        }

        center - position
    }
}
