use crate::{Interval, Point3, Ray};

/// Axis-aligned bounding box used as a cheap ray pre-filter.
///
/// Only answers "could this ray touch the box"; it never produces a hit
/// point or normal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb {
    /// Create an AABB from two corner points in any order.
    pub fn from_points(a: Point3, b: Point3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            min: box0.min.min(box1.min),
            max: box0.max.max(box1.max),
        }
    }

    /// Test if a ray intersects this AABB within the given interval.
    ///
    /// Slab method: narrow `ray_t` by each axis' entry/exit parameters and
    /// reject as soon as it becomes empty. A zero direction component
    /// yields infinite slab bounds, which leaves that axis unconstrained
    /// when the origin lies inside the slab.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        for axis in 0..3 {
            let adinv = 1.0 / r.direction[axis];
            let mut t0 = (self.min[axis] - r.origin[axis]) * adinv;
            let mut t1 = (self.max[axis] - r.origin[axis]) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            // f64::max/min ignore a NaN operand, so a boundary-grazing
            // zero direction keeps the current interval.
            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }
        true
    }

    /// A box containing nothing; the identity for [`Aabb::surrounding`].
    pub const EMPTY: Aabb = Aabb {
        min: Point3::INFINITY,
        max: Point3::NEG_INFINITY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3;

    fn unit_box() -> Aabb {
        Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_aabb_from_points_orders_corners() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 5.0), Vec3::new(0.0, 10.0, 0.0));

        assert_eq!(aabb.min, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(10.0, 10.0, 5.0));
    }

    #[test]
    fn test_aabb_surrounding() {
        let box1 = Aabb::from_points(Vec3::ZERO, Vec3::splat(5.0));
        let box2 = Aabb::from_points(Vec3::splat(3.0), Vec3::splat(10.0));
        let surrounding = Aabb::surrounding(&box1, &box2);

        assert_eq!(surrounding.min, Vec3::ZERO);
        assert_eq!(surrounding.max, Vec3::splat(10.0));

        let from_empty = Aabb::surrounding(&Aabb::EMPTY, &box1);
        assert_eq!(from_empty, box1);
    }

    #[test]
    fn test_aabb_hit_through_center() {
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(unit_box().hit(&ray, Interval::new(0.0, 100.0)));

        let diagonal = Ray::new_simple(Vec3::splat(-5.0), Vec3::ONE);
        assert!(unit_box().hit(&diagonal, Interval::new(0.0, 100.0)));
    }

    #[test]
    fn test_aabb_miss() {
        // Pointing away
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!unit_box().hit(&ray, Interval::new(0.0, 100.0)));

        // Parallel to the box, outside the x slab
        let ray = Ray::new_simple(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(!unit_box().hit(&ray, Interval::new(0.0, 100.0)));

        // Interval ends before the box
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(!unit_box().hit(&ray, Interval::new(0.0, 3.0)));
    }

    #[test]
    fn test_aabb_zero_direction_components() {
        // Two zero components: only z culls.
        let inside = Ray::new_simple(Vec3::new(0.5, 0.5, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(unit_box().hit(&inside, Interval::new(0.0, f64::INFINITY)));

        // Negative zero must not flip the slab.
        let neg_zero = Ray::new_simple(Vec3::new(0.0, 0.0, -5.0), Vec3::new(-0.0, -0.0, 1.0));
        assert!(unit_box().hit(&neg_zero, Interval::new(0.0, f64::INFINITY)));

        // Origin exactly on a slab boundary with zero direction.
        let grazing = Ray::new_simple(Vec3::new(1.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(unit_box().hit(&grazing, Interval::new(0.0, f64::INFINITY)));
    }

    #[test]
    fn test_empty_aabb_never_hit() {
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.3, -0.2, 1.0));
        assert!(!Aabb::EMPTY.hit(&ray, Interval::new(0.0, f64::MAX)));
    }
}
