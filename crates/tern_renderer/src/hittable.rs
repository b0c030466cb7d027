//! Hittable primitives and the hit record produced by intersections.

use crate::sphere::{MovingSphere, Sphere};
use crate::Material;
use tern_math::{Aabb, Interval, Point3, Ray, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point3,
    /// Unit surface normal, always pointing against the incoming ray
    pub normal: Vec3,
    /// Ray parameter where the intersection occurs
    pub t: f64,
    /// Material at the intersection point
    pub material: &'a Material,
    /// Whether the ray hit the outside of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record at parameter `t`, orienting `outward_normal` against
    /// the ray.
    pub fn new(ray: &Ray, t: f64, outward_normal: Vec3, material: &'a Material) -> Self {
        let (front_face, normal) = face_normal(ray, outward_normal);
        Self {
            p: ray.at(t),
            normal,
            t,
            material,
            front_face,
        }
    }
}

/// Returns `(front_face, normal)` with the normal flipped to face the ray
/// origin when the ray travels with the outward normal (an inside hit).
#[inline]
fn face_normal(ray: &Ray, outward_normal: Vec3) -> (bool, Vec3) {
    let front_face = ray.direction.dot(outward_normal) < 0.0;
    let normal = if front_face {
        outward_normal
    } else {
        -outward_normal
    };
    (front_face, normal)
}

/// Every kind of geometry a scene can hold.
///
/// A closed enum keeps the innermost intersection loop free of dynamic
/// dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    MovingSphere(MovingSphere),
}

impl Primitive {
    /// Intersect the ray with this primitive within `ray_t`.
    #[inline]
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, ray_t),
            Primitive::MovingSphere(sphere) => sphere.hit(ray, ray_t),
        }
    }

    /// Bounds of the primitive over its whole lifetime (including motion).
    pub fn bounding_box(&self) -> Aabb {
        match self {
            Primitive::Sphere(sphere) => sphere.bounding_box(),
            Primitive::MovingSphere(sphere) => sphere.bounding_box(),
        }
    }

    pub fn material(&self) -> &Material {
        match self {
            Primitive::Sphere(sphere) => sphere.material(),
            Primitive::MovingSphere(sphere) => sphere.material(),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<MovingSphere> for Primitive {
    fn from(sphere: MovingSphere) -> Self {
        Primitive::MovingSphere(sphere)
    }
}
