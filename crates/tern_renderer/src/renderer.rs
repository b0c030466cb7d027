//! Core path tracing integrator.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray casting with a hard depth cutoff
//! - Sky gradient background
//! - Anti-aliasing via multi-sampling
//! - Gamma correction and 8-bit quantization

use crate::{Camera, Color, RenderError, RenderResult, Scene, WorkItem};
use rand::RngCore;
use std::num::NonZeroUsize;
use tern_math::sampling::gen_f64;
use tern_math::{Interval, Ray};

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Worker threads; `None` uses the available hardware parallelism
    pub workers: Option<usize>,
    /// Base seed for the per-row random streams
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 675,
            samples_per_pixel: 50,
            max_depth: 50,
            workers: None,
            seed: 0,
        }
    }
}

impl RenderSettings {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject settings that would silently produce an empty or black image.
    pub fn validate(&self) -> RenderResult<()> {
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidSamples);
        }
        if self.max_depth == 0 {
            return Err(RenderError::InvalidDepth);
        }
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.workers == Some(0) {
            return Err(RenderError::InvalidWorkers);
        }
        Ok(())
    }

    /// Number of worker threads the pipeline will start.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        })
    }
}

/// Estimate the radiance arriving along `ray`.
///
/// Each bounce multiplies the attenuation of the surface hit into the
/// radiance gathered by the scattered ray. Rays that escape pick up the sky
/// gradient; absorbed rays and exhausted depth contribute black.
pub fn cast(scene: &Scene, ray: &Ray, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.closest_hit(ray, scene.hit_interval()) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * cast(scene, &result.scattered, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Vertical white-to-blue gradient keyed on the ray's normalized y.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction.normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white.lerp(blue, a)
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Convert an averaged linear color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let quantize = |c: f64| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z), 255]
}

/// Normalized image-plane coordinates for pixel `(x, row)` plus jitter.
///
/// Row 0 is the top of the image, while the camera's `t` runs bottom to top.
#[inline]
fn image_plane_coords(x: u32, row: u32, width: u32, height: u32, jitter: (f64, f64)) -> (f64, f64) {
    let s_span = width.saturating_sub(1).max(1) as f64;
    let t_span = height.saturating_sub(1).max(1) as f64;
    let s = (x as f64 + jitter.0) / s_span;
    let t = ((height - 1 - row) as f64 + jitter.1) / t_span;
    (s, t)
}

/// Render a single pixel of `item`'s row with multi-sampling, returning the
/// averaged linear color.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    item: &WorkItem,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..item.samples_per_pixel {
        let jitter = (gen_f64(rng), gen_f64(rng));
        let (s, t) = image_plane_coords(x, item.row, item.width, item.height, jitter);
        let ray = camera.get_ray(s, t, rng);
        pixel_color += cast(scene, &ray, item.max_depth, rng);
    }

    pixel_color / item.samples_per_pixel as f64
}
