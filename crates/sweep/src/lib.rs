//! # Sweep
//!
//! Swept-shape collision queries for kinematic character bodies.
//!
//! Sweep answers the two questions a character controller asks the world every
//! tick:
//!
//! - **Where is the ground?** A downward [`CollisionWorld::sphere_cast`] that
//!   reports the first surface a sphere touches along a ray.
//! - **How far can I actually move?** [`CollisionWorld::move_body`], which
//!   resolves penetration, sweeps the body shape along the requested
//!   displacement and slides along whatever it hits.
//!
//! The crate ships a reference world, [`StaticWorld`], made of half-space
//! planes and axis-aligned boxes. Anything that can answer the same two
//! queries can stand in for it by implementing [`CollisionWorld`].
//!
//! ## Quick Start
//!
//! ```
//! use glam::Vec3;
//! use sweep::{Collider, CollisionWorld, LayerMask, StaticWorld};
//!
//! let mut world = StaticWorld::new();
//! world.add(Collider::ground(0.0).with_tag("Ground"));
//!
//! let hit = world
//!     .sphere_cast(Vec3::new(0.0, 2.0, 0.0), 0.5, Vec3::NEG_Y, 5.0, LayerMask::QUERY_DEFAULT)
//!     .expect("ground below");
//!
//! assert!((hit.distance - 1.5).abs() < 1e-4);
//! assert_eq!(hit.normal, Vec3::Y);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod collider;
pub mod hit;
pub mod layer;
pub mod shape;
pub mod world;

// Re-exports for convenience
pub use collider::{Collider, ColliderId, ColliderKind, SurfaceTag};
pub use hit::Hit;
pub use layer::LayerMask;
pub use shape::Shape;
pub use world::{CollisionWorld, StaticWorld, DEFAULT_SKIN_WIDTH};

/// Squared length below which a direction is treated as absent.
pub const NEAR_ZERO_SQ: f32 = 1e-10;
