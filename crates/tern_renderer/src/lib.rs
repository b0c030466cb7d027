//! Tern renderer - concurrent CPU path tracing.
//!
//! A Monte Carlo path tracer over spheres with diffuse, metal and glass
//! materials. Rows of the image are rendered in parallel by a fixed worker
//! pool and reassembled in order.
//!
//! # Example
//!
//! ```no_run
//! use tern_renderer::{render_scene, CameraSettings, Color, Material, RenderSettings, Scene, Sphere, Vec3};
//!
//! let mut scene = Scene::new();
//! scene.add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, Material::lambertian(Color::splat(0.5))));
//!
//! let camera = CameraSettings::default().build();
//! let settings = RenderSettings::default().with_resolution(400, 225);
//! let image = render_scene(&scene, &camera, &settings)?;
//! assert!(image.is_complete());
//! # Ok::<(), tern_renderer::RenderError>(())
//! ```

mod camera;
mod error;
mod hittable;
mod image;
mod material;
mod pipeline;
mod renderer;
mod scene;
mod sphere;

pub use camera::{Camera, CameraSettings};
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Primitive};
pub use image::ImageBuffer;
pub use material::{Material, ScatterResult};
pub use pipeline::{
    render_line, render_scene, render_scene_with_progress, ProcessedLine, Progress, WorkItem,
};
pub use renderer::{cast, color_to_rgba, linear_to_gamma, render_pixel, sky_gradient, RenderSettings};
pub use scene::{Scene, DEFAULT_T_MAX, DEFAULT_T_MIN};
pub use sphere::{MovingSphere, Sphere};

/// Re-export the math types from tern_math
pub use tern_math::{Aabb, Color, Interval, Point3, Ray, Vec3};
