//! Sphere primitives for ray tracing.

use crate::{HitRecord, Material};
use tern_math::{Aabb, Interval, Point3, Ray, Vec3};

/// A static sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// A negative radius is kept as-is; it flips the outward normal, which
    /// turns the sphere into a hollow shell when nested in a dielectric.
    pub fn new(center: Point3, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        hit_sphere(self.center, self.radius, &self.material, ray, ray_t)
    }

    pub fn bounding_box(&self) -> Aabb {
        let rvec = Vec3::splat(self.radius.abs());
        Aabb::from_points(self.center - rvec, self.center + rvec)
    }
}

/// A sphere whose center moves linearly from `center0` at `time0` to
/// `center1` at `time1`.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingSphere {
    center0: Point3,
    center1: Point3,
    time0: f64,
    time1: f64,
    radius: f64,
    material: Material,
}

impl MovingSphere {
    pub fn new(
        center0: Point3,
        center1: Point3,
        time0: f64,
        time1: f64,
        radius: f64,
        material: Material,
    ) -> Self {
        Self {
            center0,
            center1,
            time0,
            time1,
            radius,
            material,
        }
    }

    /// Center at the given time sample.
    ///
    /// Times outside `[time0, time1]` hold the nearest endpoint, and a zero
    /// length motion interval stays at `center0`.
    pub fn center(&self, time: f64) -> Point3 {
        let span = self.time1 - self.time0;
        if span == 0.0 {
            return self.center0;
        }
        let s = ((time - self.time0) / span).clamp(0.0, 1.0);
        self.center0 + s * (self.center1 - self.center0)
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        hit_sphere(self.center(ray.time), self.radius, &self.material, ray, ray_t)
    }

    /// Box enclosing the sphere at both ends of its motion.
    pub fn bounding_box(&self) -> Aabb {
        let rvec = Vec3::splat(self.radius.abs());
        let box0 = Aabb::from_points(self.center0 - rvec, self.center0 + rvec);
        let box1 = Aabb::from_points(self.center1 - rvec, self.center1 + rvec);
        Aabb::surrounding(&box0, &box1)
    }
}

/// Closed-form ray/sphere test using the half-b quadratic.
///
/// Tries the nearer root first, then the farther one; both must lie in the
/// inclusive range `ray_t`.
#[inline]
fn hit_sphere<'a>(
    center: Point3,
    radius: f64,
    material: &'a Material,
    ray: &Ray,
    ray_t: Interval,
) -> Option<HitRecord<'a>> {
    let oc = ray.origin - center;
    let a = ray.direction.length_squared();
    let half_b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;

    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrtd = discriminant.sqrt();

    let mut root = (-half_b - sqrtd) / a;
    if !ray_t.contains(root) {
        root = (-half_b + sqrtd) / a;
        if !ray_t.contains(root) {
            return None;
        }
    }

    let p = ray.at(root);
    let outward_normal = (p - center) / radius;
    Some(HitRecord::new(ray, root, outward_normal, material))
}
