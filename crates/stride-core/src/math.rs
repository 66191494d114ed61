//! Vector and orientation helpers.
//!
//! Thin wrappers over `glam` for the handful of operations the movement code
//! needs with "never overshoot" semantics.

use glam::{Mat3, Quat, Vec3};

pub use sweep::NEAR_ZERO_SQ;

/// World up.
pub const UP: Vec3 = Vec3::Y;

/// Returns `true` if `v` is too short to define a direction.
#[inline]
#[must_use]
pub fn is_near_zero(v: Vec3) -> bool {
    v.length_squared() < NEAR_ZERO_SQ
}

/// Horizontal (x/z) part of `v`.
#[inline]
#[must_use]
pub fn lateral(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Vertical (y) part of `v`.
#[inline]
#[must_use]
pub fn vertical(v: Vec3) -> Vec3 {
    Vec3::new(0.0, v.y, 0.0)
}

/// Moves `current` toward `target` by at most `max_delta`.
///
/// Lands exactly on `target` when it is within reach, so repeated calls
/// never overshoot.
#[must_use]
pub fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let to_target = target - current;
    let distance_sq = to_target.length_squared();
    if distance_sq == 0.0 || (max_delta >= 0.0 && distance_sq <= max_delta * max_delta) {
        return target;
    }
    current + to_target * (max_delta / distance_sq.sqrt())
}

/// Rotation whose forward (+Z) axis points along `forward` with `up` as the
/// vertical reference.
///
/// Returns `None` when `forward` is near zero or parallel to `up`.
#[must_use]
pub fn look_rotation(forward: Vec3, up: Vec3) -> Option<Quat> {
    if is_near_zero(forward) {
        return None;
    }
    let forward = forward.normalize();
    let right = up.cross(forward);
    if is_near_zero(right) {
        return None;
    }
    let right = right.normalize();
    let up = forward.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, forward)).normalize())
}

/// Rotates `from` toward `to` by at most `max_degrees`, never past `to`.
#[must_use]
pub fn rotate_towards(from: Quat, to: Quat, max_degrees: f32) -> Quat {
    let angle = from.angle_between(to).to_degrees();
    if angle <= f32::EPSILON || angle <= max_degrees {
        return to;
    }
    from.slerp(to, (max_degrees / angle).max(0.0))
}

/// Angle between two vectors in degrees.
#[inline]
#[must_use]
pub fn angle_degrees(a: Vec3, b: Vec3) -> f32 {
    a.angle_between(b).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lateral_plus_vertical_recombines() {
        let v = Vec3::new(1.5, -2.0, 3.25);
        assert_eq!(lateral(v) + vertical(v), v);
    }

    #[test]
    fn move_towards_steps_by_max_delta() {
        let v = move_towards(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO, 3.0);
        assert!(v.distance(Vec3::new(7.0, 0.0, 0.0)) < 1e-6);
    }

    #[test]
    fn move_towards_snaps_to_target() {
        let v = move_towards(Vec3::new(1.0, 0.0, 1.0), Vec3::ZERO, 5.0);
        assert_eq!(v, Vec3::ZERO);
    }

    #[test]
    fn look_rotation_points_forward() {
        let q = look_rotation(Vec3::X, UP).unwrap();
        assert!((q * Vec3::Z).distance(Vec3::X) < 1e-5);
        assert!((q * Vec3::Y).distance(Vec3::Y) < 1e-5);
    }

    #[test]
    fn look_rotation_rejects_degenerate_input() {
        assert!(look_rotation(Vec3::ZERO, UP).is_none());
        assert!(look_rotation(Vec3::Y, UP).is_none());
    }

    #[test]
    fn rotate_towards_is_bounded() {
        let to = look_rotation(Vec3::X, UP).unwrap();
        let q = rotate_towards(Quat::IDENTITY, to, 30.0);
        assert!((Quat::IDENTITY.angle_between(q).to_degrees() - 30.0).abs() < 1e-2);
    }

    #[test]
    fn rotate_towards_does_not_overshoot() {
        let to = look_rotation(Vec3::X, UP).unwrap();
        let q = rotate_towards(Quat::IDENTITY, to, 500.0);
        assert!(q.angle_between(to) < 1e-4);
    }

    #[test]
    fn angle_between_up_and_side() {
        assert!((angle_degrees(Vec3::Y, Vec3::X) - 90.0).abs() < 1e-3);
    }
}
