//! Scene container and nearest-hit traversal.

use crate::{HitRecord, Primitive};
use tern_math::{Aabb, Interval, Ray};

/// Default lower bound for valid hits; keeps scattered rays from
/// re-hitting the surface they start on.
pub const DEFAULT_T_MIN: f64 = 0.001;

/// Default upper bound for valid hits.
pub const DEFAULT_T_MAX: f64 = f64::MAX;

/// An ordered list of primitives plus the valid ray parameter range.
///
/// Immutable during rendering; workers share it by reference.
#[derive(Debug, Clone)]
pub struct Scene {
    objects: Vec<Primitive>,
    bbox: Aabb,
    pub t_min: f64,
    pub t_max: f64,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
            t_min: DEFAULT_T_MIN,
            t_max: DEFAULT_T_MAX,
        }
    }

    /// Set the valid hit range used by [`Scene::hit_interval`].
    pub fn with_t_range(mut self, t_min: f64, t_max: f64) -> Self {
        self.t_min = t_min;
        self.t_max = t_max;
        self
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: impl Into<Primitive>) {
        let object = object.into();
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Primitive] {
        &self.objects
    }

    /// Union of every primitive's bounds.
    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    /// The `[t_min, t_max]` range the integrator queries with.
    pub fn hit_interval(&self) -> Interval {
        Interval::new(self.t_min, self.t_max)
    }

    /// Find the nearest intersection in `ray_t`.
    ///
    /// Linear scan with a shrinking upper bound. On an exact tie in `t`
    /// the primitive added first wins.
    pub fn closest_hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        if !self.bbox.hit(ray, ray_t) {
            return None;
        }

        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, Interval::new(ray_t.min, closest_so_far)) {
                if closest.map_or(true, |best| rec.t < best.t) {
                    closest_so_far = rec.t;
                    closest = Some(rec);
                }
            }
        }

        closest
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Primitive> for Scene {
    fn from_iter<I: IntoIterator<Item = Primitive>>(iter: I) -> Self {
        let mut scene = Scene::new();
        for object in iter {
            scene.add(object);
        }
        scene
    }
}
