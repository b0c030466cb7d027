//! Procedural demo scenes.

use rand::RngCore;
use tern_math::sampling::{gen_f64, gen_range, random_vec, random_vec_range};
use tern_renderer::{CameraSettings, Color, Material, MovingSphere, Point3, Scene, Sphere, Vec3};

/// Small spheres closer than this to the metal showcase sphere are skipped.
const CLEARANCE: f64 = 0.9;

/// Camera framing the random spheres scene.
pub fn default_camera(aspect_ratio: f64) -> CameraSettings {
    CameraSettings::default()
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0)
        .with_aspect_ratio(aspect_ratio)
}

/// Ground, a 22x22 grid of small spheres and three large ones.
pub fn random_spheres(rng: &mut dyn RngCore) -> Scene {
    build(rng, false)
}

/// Like [`random_spheres`], but the diffuse spheres bounce upwards during
/// the [0, 1] shutter interval.
pub fn bouncing_spheres(rng: &mut dyn RngCore) -> Scene {
    build(rng, true)
}

fn build(rng: &mut dyn RngCore, moving: bool) -> Scene {
    let mut scene = Scene::new();

    scene.add(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Material::lambertian(Color::splat(0.5)),
    ));

    let showcase = Point3::new(4.0, 0.2, 0.0);
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f64(rng);
            let center = Point3::new(
                f64::from(a) + 0.9 * gen_f64(rng),
                0.2,
                f64::from(b) + 0.9 * gen_f64(rng),
            );
            if (center - showcase).length() <= CLEARANCE {
                continue;
            }

            if choose_mat < 0.8 {
                let albedo = random_vec(rng) * random_vec(rng);
                let material = Material::lambertian(albedo);
                if moving {
                    let center1 = center + Vec3::new(0.0, gen_range(rng, 0.0, 0.5), 0.0);
                    scene.add(MovingSphere::new(center, center1, 0.0, 1.0, 0.2, material));
                } else {
                    scene.add(Sphere::new(center, 0.2, material));
                }
            } else if choose_mat < 0.95 {
                let albedo = random_vec_range(rng, 0.5, 1.0);
                let fuzz = gen_range(rng, 0.0, 0.5);
                scene.add(Sphere::new(center, 0.2, Material::metal(albedo, fuzz)));
            } else {
                scene.add(Sphere::new(center, 0.2, Material::dielectric(1.5)));
            }
        }
    }

    scene.add(Sphere::new(
        Point3::new(0.0, 1.0, 0.0),
        1.0,
        Material::dielectric(1.5),
    ));
    scene.add(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Material::lambertian(Color::new(0.4, 0.2, 0.1)),
    ));
    scene.add(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Material::metal(Color::new(0.7, 0.6, 0.5), 0.0),
    ));

    scene
}
