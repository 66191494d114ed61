//! Entity core: the kinematic body every behavior state drives.
//!
//! An [`Entity`] owns all kinematic data of one character:
//! - velocity, split into lateral (x/z) and vertical (y) halves
//! - grounding: flag, last ground time, last accepted ground hit
//! - capsule [`Body`] geometry and per-entity [`Multipliers`]
//! - position, facing and an optional attached platform
//!
//! It implements the movement primitives states are built from
//! ([`accelerate`](Entity::accelerate), [`decelerate`](Entity::decelerate),
//! [`face_direction`](Entity::face_direction)) and the two per-tick routines
//! the simulation runs after the active state:
//! [`handle_controller`](Entity::handle_controller) and
//! [`handle_ground`](Entity::handle_ground).
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use stride_core::clock::FrameTime;
//! use stride_core::entity::{Body, Entity};
//!
//! let mut entity = Entity::new(Body::default());
//! entity.set_time(FrameTime::new(0.1, 0.1));
//!
//! entity.accelerate(Vec3::X, 28.0, 13.0, 6.0);
//! assert!((entity.lateral_velocity().x - 1.3).abs() < 1e-5);
//!
//! entity.decelerate(100.0);
//! assert_eq!(entity.lateral_velocity(), Vec3::ZERO);
//! ```

pub mod components;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use sweep::{ColliderId, CollisionWorld, Hit, LayerMask};
use tracing::{debug, trace};

use crate::clock::FrameTime;
use crate::math::{self, UP};
use crate::signal::Signal;

pub use components::{Body, Multipliers, GROUND_OFFSET};

/// Outcome of one [`Entity::handle_ground`] evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum GroundTransition {
    /// Grounding did not change.
    Unchanged,
    /// The entity landed this tick.
    Entered,
    /// The entity left the ground this tick.
    Exited,
    /// The probe found a contact the entity cannot stand on: above the step
    /// plane or steeper than the slope limit.
    ///
    /// The entity stays airborne; what to do with the contact (ledge grab,
    /// wall slide, ...) is up to the owner.
    HighLedge(Hit),
}

/// Ground notifications. Each fires exactly once per edge.
#[derive(Debug, Default)]
pub struct EntityEvents {
    /// Airborne to grounded.
    pub on_ground_enter: Signal,
    /// Grounded to airborne.
    pub on_ground_exit: Signal,
}

/// Serializable view of an entity's kinematic state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicSnapshot {
    /// Entity position.
    pub position: Vec3,
    /// Full velocity.
    pub velocity: Vec3,
    /// Facing direction.
    pub forward: Vec3,
    /// Grounded flag.
    pub grounded: bool,
    /// Time the entity last left the ground.
    pub last_ground_time: f32,
}

/// A kinematic character body.
#[derive(Debug)]
pub struct Entity {
    position: Vec3,
    rotation: Quat,
    velocity: Vec3,
    grounded: bool,
    last_ground_time: f32,
    ground_hit: Option<Hit>,
    body: Body,
    original_height: f32,
    multipliers: Multipliers,
    collision_enabled: bool,
    collision_mask: LayerMask,
    attached_platform: Option<ColliderId>,
    time: FrameTime,
    /// Ground enter/exit observers.
    pub events: EntityEvents,
}

impl Entity {
    /// Creates a grounded, collision-governed entity at the origin.
    #[must_use]
    pub fn new(body: Body) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            grounded: true,
            last_ground_time: 0.0,
            ground_hit: None,
            original_height: body.height,
            body,
            multipliers: Multipliers::default(),
            collision_enabled: true,
            collision_mask: LayerMask::QUERY_DEFAULT,
            attached_platform: None,
            time: FrameTime::default(),
            events: EntityEvents::default(),
        }
    }

    /// Sets the starting position.
    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the starting grounded flag.
    #[must_use]
    pub fn with_grounded(mut self, grounded: bool) -> Self {
        self.grounded = grounded;
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Entity position (the capsule center minus [`Body::center`]).
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Teleports the entity.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Capsule center in world space.
    #[must_use]
    pub fn center_position(&self) -> Vec3 {
        self.position + self.body.center
    }

    /// Feet-anchored position that ignores height changes made by
    /// [`resize`](Self::resize).
    #[must_use]
    pub fn unsized_position(&self) -> Vec3 {
        let up = self.up();
        self.center_position() - up * self.body.height * 0.5 + up * self.original_height * 0.5
    }

    /// Orientation.
    #[must_use]
    pub const fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Sets the orientation.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    /// Facing direction (local +Z).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Local up (+Y).
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.rotation * UP
    }

    /// Full velocity.
    #[must_use]
    pub const fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Replaces the full velocity.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Horizontal (x/z) velocity.
    #[must_use]
    pub fn lateral_velocity(&self) -> Vec3 {
        math::lateral(self.velocity)
    }

    /// Replaces the x/z velocity, keeping y.
    pub fn set_lateral_velocity(&mut self, lateral: Vec3) {
        self.velocity = Vec3::new(lateral.x, self.velocity.y, lateral.z);
    }

    /// Vertical velocity as a vector along y.
    #[must_use]
    pub fn vertical_velocity(&self) -> Vec3 {
        math::vertical(self.velocity)
    }

    /// Replaces the y velocity with `vertical.y`, keeping x/z.
    pub fn set_vertical_velocity(&mut self, vertical: Vec3) {
        self.velocity.y = vertical.y;
    }

    /// Vertical speed (signed, up is positive).
    #[must_use]
    pub const fn vertical_speed(&self) -> f32 {
        self.velocity.y
    }

    /// Returns `true` while standing on ground.
    #[must_use]
    pub const fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Time the entity last left the ground.
    #[must_use]
    pub const fn last_ground_time(&self) -> f32 {
        self.last_ground_time
    }

    /// Hit that was accepted on the last landing.
    #[must_use]
    pub fn ground_hit(&self) -> Option<&Hit> {
        self.ground_hit.as_ref()
    }

    /// Body geometry.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Current capsule height.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.body.height
    }

    /// Capsule radius.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.body.radius
    }

    /// Height the body was created with.
    #[must_use]
    pub const fn original_height(&self) -> f32 {
        self.original_height
    }

    /// Changes the capsule height (crouching, squashing). The original height
    /// is kept for [`unsized_position`](Self::unsized_position).
    pub fn resize(&mut self, height: f32) {
        self.body.height = height.max(f32::EPSILON);
    }

    /// Tuning multipliers.
    #[must_use]
    pub const fn multipliers(&self) -> &Multipliers {
        &self.multipliers
    }

    /// Mutable tuning multipliers.
    pub fn multipliers_mut(&mut self) -> &mut Multipliers {
        &mut self.multipliers
    }

    /// Returns `true` if movement goes through the collision world.
    #[must_use]
    pub const fn collision_enabled(&self) -> bool {
        self.collision_enabled
    }

    /// Switches between collision-governed and free movement.
    pub fn set_collision_enabled(&mut self, enabled: bool) {
        self.collision_enabled = enabled;
    }

    /// Layers the entity collides with and stands on.
    #[must_use]
    pub const fn collision_mask(&self) -> LayerMask {
        self.collision_mask
    }

    /// Sets the collision layers.
    pub fn set_collision_mask(&mut self, mask: LayerMask) {
        self.collision_mask = mask;
    }

    /// Platform the entity currently rides, if any.
    #[must_use]
    pub const fn attached_platform(&self) -> Option<ColliderId> {
        self.attached_platform
    }

    /// Attaches the entity to a platform until it next leaves the ground.
    pub fn attach_platform(&mut self, platform: ColliderId) {
        self.attached_platform = Some(platform);
    }

    /// Detaches from the current platform.
    pub fn detach_platform(&mut self) {
        self.attached_platform = None;
    }

    /// Frame time the movement operations integrate with.
    #[must_use]
    pub const fn time(&self) -> FrameTime {
        self.time
    }

    /// Sets the frame time for the coming tick.
    pub fn set_time(&mut self, time: FrameTime) {
        self.time = time;
    }

    /// Serializable snapshot of the kinematic state.
    #[must_use]
    pub fn snapshot(&self) -> KinematicSnapshot {
        KinematicSnapshot {
            position: self.position,
            velocity: self.velocity,
            forward: self.forward(),
            grounded: self.grounded,
            last_ground_time: self.last_ground_time,
        }
    }

    // -------------------------------------------------------------------------
    // Movement primitives
    // -------------------------------------------------------------------------

    /// Accelerates the lateral velocity along `direction`.
    ///
    /// The lateral velocity is split into a forward speed (its projection on
    /// `direction`) and a turning component orthogonal to it. The forward
    /// speed gains `acceleration` while below `top_speed` or while reversing,
    /// and is clamped to `±top_speed`. The turning component decays linearly
    /// toward zero at `turning_drag`. Above top speed, non-reversing input
    /// keeps the forward speed as is.
    ///
    /// A near-zero `direction` is a no-op.
    pub fn accelerate(
        &mut self,
        direction: Vec3,
        turning_drag: f32,
        acceleration: f32,
        top_speed: f32,
    ) {
        if math::is_near_zero(direction) {
            return;
        }

        let dt = self.time.delta;
        let lateral = self.lateral_velocity();
        let mut speed = direction.dot(lateral);
        let turning = lateral - direction * speed;
        let turning_delta = turning_drag * self.multipliers.turning_drag * dt;
        let target_top_speed = top_speed * self.multipliers.top_speed;

        if lateral.length() < target_top_speed || speed < 0.0 {
            speed += acceleration * self.multipliers.acceleration * dt;
            speed = speed.clamp(-target_top_speed, target_top_speed);
        }

        let turning = math::move_towards(turning, Vec3::ZERO, turning_delta);
        self.set_lateral_velocity(direction * speed + turning);
    }

    /// Moves the lateral velocity toward zero by `deceleration` per second,
    /// never past zero.
    pub fn decelerate(&mut self, deceleration: f32) {
        let delta = deceleration * self.multipliers.deceleration * self.time.delta;
        let lateral = math::move_towards(self.lateral_velocity(), Vec3::ZERO, delta);
        self.set_lateral_velocity(lateral);
    }

    /// Turns toward `direction` (with world up) by at most
    /// `degrees_per_second` this tick. A zero direction is a no-op.
    pub fn face_direction(&mut self, direction: Vec3, degrees_per_second: f32) {
        let Some(target) = math::look_rotation(direction, UP) else {
            return;
        };
        let max_degrees = degrees_per_second * self.time.delta;
        self.rotation = math::rotate_towards(self.rotation, target, max_degrees);
    }

    // -------------------------------------------------------------------------
    // Ground
    // -------------------------------------------------------------------------

    /// Sweeps the body's sphere from the capsule center.
    ///
    /// `distance` is measured from the center; the sphere travels
    /// `|distance - radius|`.
    pub fn sphere_cast<W: CollisionWorld + ?Sized>(
        &self,
        world: &W,
        direction: Vec3,
        distance: f32,
        mask: LayerMask,
    ) -> Option<Hit> {
        let cast_distance = (distance - self.body.radius).abs();
        world.sphere_cast(
            self.center_position(),
            self.body.radius,
            direction,
            cast_distance,
            mask,
        )
    }

    /// Point at step height above the bottom of the capsule.
    #[must_use]
    pub fn step_position(&self) -> Vec3 {
        self.center_position() - self.up() * (self.body.height * 0.5 - self.body.step_offset)
    }

    /// Returns `true` if `point` lies below the step plane.
    #[must_use]
    pub fn is_point_under_step(&self, point: Vec3) -> bool {
        self.step_position().y > point.y
    }

    /// Accepts a landing contact that is below the step plane and flatter
    /// than the slope limit.
    #[must_use]
    pub fn evaluate_landing(&self, hit: &Hit) -> bool {
        self.is_point_under_step(hit.point) && hit.slope_angle(UP) < self.body.slope_limit
    }

    /// Re-evaluates grounding. Runs once per tick after movement.
    ///
    /// Landing requires a probe hit while not moving upward. An airborne
    /// entity that finds an acceptable contact becomes grounded; one that
    /// finds an unacceptable contact reports [`GroundTransition::HighLedge`].
    /// A grounded entity without a landing contact leaves the ground.
    pub fn handle_ground<W: CollisionWorld + ?Sized>(&mut self, world: &W) -> GroundTransition {
        let distance = self.body.height * 0.5 + GROUND_OFFSET;

        match self.sphere_cast(world, Vec3::NEG_Y, distance, self.collision_mask) {
            Some(hit) if self.velocity.y <= 0.0 => {
                if self.grounded {
                    GroundTransition::Unchanged
                } else if self.evaluate_landing(&hit) {
                    self.enter_ground(hit);
                    GroundTransition::Entered
                } else {
                    trace!(
                        target: "stride::ground",
                        collider = %hit.collider,
                        point = ?hit.point,
                        "high ledge contact"
                    );
                    GroundTransition::HighLedge(hit)
                }
            }
            _ => {
                if self.exit_ground() {
                    GroundTransition::Exited
                } else {
                    GroundTransition::Unchanged
                }
            }
        }
    }

    /// Lands on `hit`. Returns `false` if already grounded.
    ///
    /// Landing on a platform collider attaches the entity to it.
    pub fn enter_ground(&mut self, hit: Hit) -> bool {
        if self.grounded {
            return false;
        }
        debug!(
            target: "stride::ground",
            collider = %hit.collider,
            tag = %hit.tag,
            "ground enter"
        );
        if hit.platform {
            self.attached_platform = Some(hit.collider);
        }
        self.ground_hit = Some(hit);
        self.grounded = true;
        self.events.on_ground_enter.emit(&());
        true
    }

    /// Leaves the ground. Returns `false` if already airborne.
    ///
    /// Detaches from any platform, stamps the last ground time and drops any
    /// downward velocity so the body does not snap down off a ledge.
    pub fn exit_ground(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.grounded = false;
        self.attached_platform = None;
        self.last_ground_time = self.time.time;
        self.velocity.y = self.velocity.y.max(0.0);
        debug!(target: "stride::ground", time = self.last_ground_time, "ground exit");
        self.events.on_ground_exit.emit(&());
        true
    }

    // -------------------------------------------------------------------------
    // Movement application
    // -------------------------------------------------------------------------

    /// Applies `velocity * dt` to the position, through the collision world
    /// when collision-governed.
    pub fn handle_controller<W: CollisionWorld + ?Sized>(&mut self, world: &W) {
        let displacement = self.velocity * self.time.delta;
        if self.collision_enabled {
            let applied = world.move_body(
                &self.body.shape(),
                self.center_position(),
                displacement,
                self.collision_mask,
            );
            self.position += applied;
        } else {
            self.position += displacement;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use sweep::{Collider, StaticWorld, DEFAULT_SKIN_WIDTH};

    const DT: f32 = 0.016;

    fn entity() -> Entity {
        let mut e = Entity::new(Body::default());
        e.set_time(FrameTime::new(DT, 1.0));
        e
    }

    fn floor_world() -> StaticWorld {
        let mut world = StaticWorld::new();
        world.add(Collider::ground(0.0).with_tag("Ground"));
        world
    }

    fn standing(grounded: bool) -> Entity {
        let mut e = Entity::new(Body::default())
            .with_position(Vec3::new(0.0, 1.0 + DEFAULT_SKIN_WIDTH, 0.0))
            .with_grounded(grounded);
        e.set_time(FrameTime::new(DT, 1.0));
        e
    }

    fn counter(signal: &mut Signal) -> Rc<Cell<u32>> {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        signal.connect(move |_| seen.set(seen.get() + 1));
        count
    }

    mod accelerate_tests {
        use super::*;

        #[test]
        fn zero_direction_is_noop() {
            let mut e = entity();
            e.set_velocity(Vec3::new(1.0, 2.0, 3.0));
            e.accelerate(Vec3::ZERO, 28.0, 13.0, 6.0);
            assert_eq!(e.velocity(), Vec3::new(1.0, 2.0, 3.0));
        }

        #[test]
        fn gains_speed_from_rest() {
            let mut e = entity();
            e.accelerate(Vec3::X, 28.0, 13.0, 6.0);
            assert!((e.lateral_velocity().x - 13.0 * DT).abs() < 1e-6);
        }

        #[test]
        fn keeps_vertical_velocity() {
            let mut e = entity();
            e.set_velocity(Vec3::new(0.0, -4.0, 0.0));
            e.accelerate(Vec3::X, 28.0, 13.0, 6.0);
            assert!((e.vertical_speed() + 4.0).abs() < f32::EPSILON);
        }

        #[test]
        fn clamps_at_top_speed() {
            let mut e = entity();
            for _ in 0..1000 {
                e.accelerate(Vec3::X, 28.0, 13.0, 6.0);
            }
            assert!((e.lateral_velocity().length() - 6.0).abs() < 1e-5);
        }

        #[test]
        fn above_top_speed_forward_input_keeps_speed() {
            let mut e = entity();
            e.set_velocity(Vec3::new(8.0, 0.0, 0.0));
            e.accelerate(Vec3::X, 28.0, 13.0, 6.0);
            assert!((e.lateral_velocity().x - 8.0).abs() < 1e-6);
        }

        #[test]
        fn reversing_above_top_speed_is_clamped() {
            let mut e = entity();
            e.set_velocity(Vec3::new(8.0, 0.0, 0.0));
            e.accelerate(Vec3::NEG_X, 28.0, 13.0, 6.0);
            // Signed forward speed -8 + 0.208 is clamped to -6 along -X.
            assert!((e.lateral_velocity().x - 6.0).abs() < 1e-5);
        }

        #[test]
        fn turning_component_decays() {
            let mut e = entity();
            e.set_velocity(Vec3::new(0.0, 0.0, 3.0));
            e.accelerate(Vec3::X, 28.0, 13.0, 6.0);
            let lateral = e.lateral_velocity();
            assert!((lateral.z - (3.0 - 28.0 * DT)).abs() < 1e-5);
            assert!((lateral.x - 13.0 * DT).abs() < 1e-5);
        }

        #[test]
        fn multipliers_scale_top_speed() {
            let mut e = entity();
            e.multipliers_mut().top_speed = 0.5;
            for _ in 0..1000 {
                e.accelerate(Vec3::X, 28.0, 13.0, 6.0);
            }
            assert!((e.lateral_velocity().length() - 3.0).abs() < 1e-5);
        }
    }

    mod decelerate_tests {
        use super::*;

        #[test]
        fn slows_linearly() {
            let mut e = entity();
            e.set_velocity(Vec3::new(5.0, 1.0, 0.0));
            e.decelerate(10.0);
            assert!((e.lateral_velocity().x - (5.0 - 10.0 * DT)).abs() < 1e-5);
            assert!((e.vertical_speed() - 1.0).abs() < f32::EPSILON);
        }

        #[test]
        fn stops_exactly_at_zero() {
            let mut e = entity();
            e.set_velocity(Vec3::new(0.05, 0.0, -0.05));
            e.decelerate(28.0);
            assert_eq!(e.lateral_velocity(), Vec3::ZERO);
        }

        #[test]
        fn multiplier_scales_rate() {
            let mut e = entity();
            e.multipliers_mut().deceleration = 2.0;
            e.set_velocity(Vec3::new(5.0, 0.0, 0.0));
            e.decelerate(10.0);
            assert!((e.lateral_velocity().x - (5.0 - 20.0 * DT)).abs() < 1e-5);
        }
    }

    mod facing_tests {
        use super::*;

        #[test]
        fn zero_direction_is_noop() {
            let mut e = entity();
            e.face_direction(Vec3::ZERO, 940.0);
            assert_eq!(e.rotation(), Quat::IDENTITY);
        }

        #[test]
        fn turns_by_at_most_rate() {
            let mut e = entity();
            e.face_direction(Vec3::X, 100.0);
            let turned = Quat::IDENTITY.angle_between(e.rotation()).to_degrees();
            assert!((turned - 100.0 * DT).abs() < 1e-2);
        }

        #[test]
        fn reaches_target_without_overshoot() {
            let mut e = entity();
            for _ in 0..100 {
                e.face_direction(Vec3::X, 940.0);
            }
            assert!(e.forward().distance(Vec3::X) < 1e-4);
        }
    }

    mod ground_tests {
        use super::*;

        #[test]
        fn airborne_body_lands_once() {
            let world = floor_world();
            let mut e = standing(false);
            let enters = counter(&mut e.events.on_ground_enter);

            assert_eq!(e.handle_ground(&world), GroundTransition::Entered);
            assert_eq!(e.handle_ground(&world), GroundTransition::Unchanged);

            assert!(e.is_grounded());
            assert_eq!(enters.get(), 1);
            assert_eq!(e.ground_hit().unwrap().tag.as_str(), "Ground");
        }

        #[test]
        fn rising_body_does_not_land() {
            let world = floor_world();
            let mut e = standing(false);
            e.set_velocity(Vec3::new(0.0, 5.0, 0.0));
            assert_eq!(e.handle_ground(&world), GroundTransition::Unchanged);
            assert!(!e.is_grounded());
        }

        #[test]
        fn leaving_ground_clamps_downward_velocity() {
            let world = StaticWorld::new();
            let mut e = standing(true);
            let exits = counter(&mut e.events.on_ground_exit);
            e.set_velocity(Vec3::new(2.0, -7.0, 0.0));

            assert_eq!(e.handle_ground(&world), GroundTransition::Exited);
            assert_eq!(e.handle_ground(&world), GroundTransition::Unchanged);

            assert_eq!(exits.get(), 1);
            assert!(e.vertical_speed().abs() < f32::EPSILON);
            assert!((e.lateral_velocity().x - 2.0).abs() < f32::EPSILON);
            assert!((e.last_ground_time() - 1.0).abs() < f32::EPSILON);
        }

        #[test]
        fn jumping_off_ground_keeps_upward_velocity() {
            let world = floor_world();
            let mut e = standing(true);
            e.set_velocity(Vec3::new(0.0, 17.0, 0.0));
            assert_eq!(e.handle_ground(&world), GroundTransition::Exited);
            assert!((e.vertical_speed() - 17.0).abs() < f32::EPSILON);
        }

        #[test]
        fn steep_slope_is_high_ledge() {
            let mut world = StaticWorld::new();
            // 60 degree slope through the point below the body.
            let normal = Vec3::new(60f32.to_radians().sin(), 60f32.to_radians().cos(), 0.0);
            world.add(Collider::plane(normal, 0.0));
            let mut e = Entity::new(Body::default())
                .with_position(Vec3::new(0.0, 1.2, 0.0))
                .with_grounded(false);
            e.set_time(FrameTime::new(DT, 1.0));

            assert!(matches!(e.handle_ground(&world), GroundTransition::HighLedge(_)));
            assert!(!e.is_grounded());
        }

        #[test]
        fn contact_above_step_is_rejected() {
            let e = standing(false);
            let hit = Hit {
                point: Vec3::new(0.0, 0.5, 0.0),
                normal: Vec3::Y,
                distance: 0.0,
                collider: ColliderId::new(0),
                tag: sweep::SurfaceTag::default(),
                platform: false,
            };
            assert!(!e.evaluate_landing(&hit));
        }

        #[test]
        fn landing_on_platform_attaches_until_exit() {
            let mut world = StaticWorld::new();
            let platform = world.add(
                Collider::aabb(Vec3::new(0.0, -0.5, 0.0), Vec3::new(2.0, 0.5, 2.0)).as_platform(),
            );
            let mut e = standing(false);

            e.handle_ground(&world);
            assert_eq!(e.attached_platform(), Some(platform));

            world.remove(platform);
            e.handle_ground(&world);
            assert_eq!(e.attached_platform(), None);
        }

        #[test]
        fn step_position_is_step_offset_above_feet() {
            let e = Entity::new(Body::default()).with_position(Vec3::new(0.0, 1.0, 0.0));
            assert!((e.step_position().y - 0.3).abs() < 1e-6);
        }
    }

    mod controller_tests {
        use super::*;

        #[test]
        fn free_body_translates_directly() {
            let world = floor_world();
            let mut e = standing(true);
            e.set_collision_enabled(false);
            e.set_velocity(Vec3::new(0.0, -100.0, 0.0));
            let start = e.position();
            e.handle_controller(&world);
            assert!((e.position().y - (start.y - 100.0 * DT)).abs() < 1e-4);
        }

        #[test]
        fn collision_body_stops_at_floor() {
            let world = floor_world();
            let mut e = standing(true);
            e.set_velocity(Vec3::new(0.0, -100.0, 0.0));
            e.handle_controller(&world);
            assert!(e.position().y >= 1.0);
        }

        #[test]
        fn lateral_motion_is_applied() {
            let world = floor_world();
            let mut e = standing(true);
            e.set_velocity(Vec3::new(6.0, 0.0, 0.0));
            e.handle_controller(&world);
            assert!((e.position().x - 6.0 * DT).abs() < 1e-4);
        }
    }

    #[test]
    fn resize_keeps_unsized_position() {
        let mut e = Entity::new(Body::default()).with_position(Vec3::new(0.0, 1.0, 0.0));
        let before = e.unsized_position();
        e.resize(1.0);
        // Shrinking the capsule around the same center lowers its top, not the reference.
        assert!((e.unsized_position().y - (before.y + 0.5)).abs() < 1e-6);
        assert!((e.original_height() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn snapshot_serializes() {
        let e = standing(true);
        let json = serde_json::to_string(&e.snapshot()).unwrap();
        assert!(json.contains("\"grounded\":true"));
    }
}
