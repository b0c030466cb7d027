mod cli;
mod logger;
mod scenes;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, SceneKind};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tern_renderer::{render_scene_with_progress, RenderSettings};

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_logger(args.log_level.map(Into::into));

    let mut settings = RenderSettings::default()
        .with_resolution(args.width, args.height())
        .with_quality(args.samples, args.depth)
        .with_seed(args.seed);
    if let Some(ncpu) = args.ncpu {
        settings = settings.with_workers(ncpu);
    }

    let mut scene_rng = StdRng::seed_from_u64(args.seed);
    let (scene, camera) = match args.scene {
        SceneKind::Random => (
            scenes::random_spheres(&mut scene_rng),
            scenes::default_camera(args.aspect),
        ),
        SceneKind::Motion => (
            scenes::bouncing_spheres(&mut scene_rng),
            scenes::default_camera(args.aspect).with_shutter(0.0, 1.0),
        ),
    };
    info!("Scene {:?}: {} objects", args.scene, scene.len());

    let image = render_scene_with_progress(&scene, &camera.build(), &settings, |progress| {
        debug!(
            "Line {} done ({} of {})",
            progress.row, progress.rows_done, progress.total_rows
        );
    })
    .context("Render failed")?;

    let (width, height) = (image.width, image.height);
    let png = image::RgbaImage::from_raw(width, height, image.into_rgba())
        .context("Pixel buffer does not match the image dimensions")?;
    png.save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output))?;

    info!("Wrote {}x{} image to {}", width, height, args.output);
    Ok(())
}
