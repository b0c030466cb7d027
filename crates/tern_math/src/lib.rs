//! Tern math types.
//!
//! Double precision vector algebra plus the small geometric primitives the
//! path tracer is built on: rays, intervals and axis-aligned boxes.

/// 3-component `f64` vector used for points, directions and colors.
pub use glam::DVec3 as Vec3;

mod aabb;
mod interval;
mod ray;
pub mod sampling;
pub mod vector;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use vector::{near_zero, reflect, refract};

/// A position in world space.
pub type Point3 = Vec3;

/// Linear RGB radiance or reflectance.
pub type Color = Vec3;
