//! Concurrent scanline rendering.
//!
//! Every image row becomes one [`WorkItem`] on a bounded queue sized to the
//! whole image. A fixed pool of workers claims rows from the queue, renders
//! them and sends each finished [`ProcessedLine`] to a single aggregator on
//! the calling thread, which places rows by index so completion order does
//! not matter.

use crate::renderer::{color_to_rgba, render_pixel};
use crate::{Camera, ImageBuffer, RenderError, RenderResult, RenderSettings, Scene};
use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

/// One image row waiting to be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkItem {
    /// Row index, 0 = top of the image
    pub row: u32,
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    /// Seed of this row's random stream
    pub seed: u64,
}

impl WorkItem {
    pub fn new(row: u32, settings: &RenderSettings) -> Self {
        Self {
            row,
            width: settings.width,
            height: settings.height,
            samples_per_pixel: settings.samples_per_pixel,
            max_depth: settings.max_depth,
            seed: row_seed(settings.seed, row),
        }
    }
}

/// A finished row of quantized pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedLine {
    pub row: u32,
    pub colors: Vec<[u8; 4]>,
}

/// Reported to the host after each row is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Row that was just written
    pub row: u32,
    pub rows_done: u32,
    pub total_rows: u32,
}

/// Derive a row's seed so output does not depend on which worker renders it.
fn row_seed(seed: u64, row: u32) -> u64 {
    seed ^ (u64::from(row) + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Render every pixel of one row.
pub fn render_line(scene: &Scene, camera: &Camera, item: &WorkItem) -> ProcessedLine {
    let mut rng = StdRng::seed_from_u64(item.seed);
    let colors = (0..item.width)
        .map(|x| color_to_rgba(render_pixel(camera, scene, x, item, &mut rng)))
        .collect();

    ProcessedLine {
        row: item.row,
        colors,
    }
}

/// Render the scene into an RGBA8 buffer.
pub fn render_scene(
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
) -> RenderResult<ImageBuffer> {
    render_scene_with_progress(scene, camera, settings, |_| {})
}

/// Render the scene, calling `on_progress` on the calling thread each time a
/// row is assembled.
pub fn render_scene_with_progress<F>(
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
    mut on_progress: F,
) -> RenderResult<ImageBuffer>
where
    F: FnMut(Progress),
{
    settings.validate()?;

    let workers = settings.worker_count();
    let rows = settings.height as usize;
    // Workers block on channel receives, so they need a private pool with
    // exactly one thread each; on the global pool they could starve it.
    let pool =rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("tern-worker-{i}"))
        .build()
        .map_err(|e| RenderError::WorkerPool(e.to_string()))?;

    info!(
        "Rendering {}x{} @ {} spp, depth {}, {} objects on {} workers",
        settings.width,
        settings.height,
        settings.samples_per_pixel,
        settings.max_depth,
        scene.len(),
        workers
    );
    let start = Instant::now();
    let mut image = ImageBuffer::new(settings.width, settings.height);

    pool.in_place_scope(|s| {
        let (work_tx, work_rx) = bounded::<WorkItem>(rows);
        let (line_tx, line_rx) = bounded::<ProcessedLine>(rows);

        for worker_id in 0..workers {
            let work_rx = work_rx.clone();
            let line_tx = line_tx.clone();
            s.spawn(move |_| run_worker(worker_id, scene, camera, work_rx, line_tx));
        }
        // Only the workers keep the result queue open.
        drop(line_tx);
        drop(work_rx);

        for row in 0..settings.height {
            // Capacity covers every row, so this never waits on a worker.
            if work_tx.send(WorkItem::new(row, settings)).is_err() {
                break;
            }
        }
        drop(work_tx);

        assemble(&mut image, line_rx, &mut on_progress)
    })?;

    info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}

fn run_worker(
    worker_id: usize,
    scene: &Scene,
    camera: &Camera,
    work: Receiver<WorkItem>,
    lines: Sender<ProcessedLine>,
) {
    debug!("Worker {worker_id} starting");
    let mut rendered = 0;
    for item in work.iter() {
        if lines.send(render_line(scene, camera, &item)).is_err() {
            // Aggregator gave up; remaining rows are not needed.
            break;
        }
        rendered += 1;
    }
    debug!("Worker {worker_id} finished after {rendered} rows");
}

/// Write finished rows into `image` until every sender is gone.
fn assemble(
    image: &mut ImageBuffer,
    lines: Receiver<ProcessedLine>,
    on_progress: &mut dyn FnMut(Progress),
) -> RenderResult<()> {
    let total_rows = image.height;
    let mut rows_done = 0;

    for line in lines.iter() {
        image.write_row(line.row, &line.colors)?;
        rows_done += 1;
        trace!("Line {} assembled ({rows_done} of {total_rows})", line.row);
        on_progress(Progress {
            row: line.row,
            rows_done,
            total_rows,
        });
    }

    if rows_done < total_rows {
        return Err(RenderError::MissingRows((total_rows - rows_done) as usize));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CameraSettings, Color, Material, MovingSphere, Sphere};
    use tern_math::Vec3;

    fn small_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add(Sphere::new(
            Vec3::new(0.0, -100.5, -1.0),
            100.0,
            Material::lambertian(Color::new(0.8, 0.8, 0.0)),
        ));
        scene.add(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Material::lambertian(Color::new(0.1, 0.2, 0.5)),
        ));
        scene.add(Sphere::new(
            Vec3::new(-1.0, 0.0, -1.0),
            0.5,
            Material::dielectric(1.5),
        ));
        scene.add(MovingSphere::new(
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.3, -1.0),
            0.0,
            1.0,
            0.5,
            Material::metal(Color::new(0.8, 0.6, 0.2), 0.3),
        ));
        scene
    }

    fn small_camera() -> Camera {
        CameraSettings::default().with_shutter(0.0, 1.0).build()
    }

    fn small_settings() -> RenderSettings {
        RenderSettings::default()
            .with_resolution(16, 9)
            .with_quality(4, 8)
            .with_seed(7)
    }

    #[test]
    fn test_every_row_assembled_once() {
        let scene = small_scene();
        let camera = small_camera();

        for workers in [1, 2, 5, 16] {
            let settings = small_settings().with_workers(workers);
            let mut seen = vec![0u32; settings.height as usize];
            let mut last_done = 0;

            let image = render_scene_with_progress(&scene, &camera, &settings, |p| {
                seen[p.row as usize] += 1;
                assert_eq!(p.rows_done, last_done + 1);
                assert_eq!(p.total_rows, 9);
                last_done = p.rows_done;
            })
            .unwrap();

            assert!(image.is_complete());
            assert_eq!(image.rows_assembled(), 9);
            assert!(seen.iter().all(|count| *count == 1), "workers={workers}: {seen:?}");
            assert_eq!(image.as_rgba().len(), 16 * 9 * 4);
        }
    }

    #[test]
    fn test_worker_count_does_not_change_pixels() {
        let scene = small_scene();
        let camera = small_camera();

        let single = render_scene(&scene, &camera, &small_settings().with_workers(1)).unwrap();
        let many = render_scene(&scene, &camera, &small_settings().with_workers(4)).unwrap();

        assert_eq!(single.as_rgba(), many.as_rgba());
    }

    #[test]
    fn test_seed_changes_noise() {
        let scene = small_scene();
        let camera = small_camera();

        let a = render_scene(&scene, &camera, &small_settings().with_workers(2)).unwrap();
        let b = render_scene(&scene, &camera, &small_settings().with_workers(2).with_seed(8)).unwrap();

        assert_ne!(a.as_rgba(), b.as_rgba());
    }

    #[test]
    fn test_empty_scene_renders_sky() {
        let scene = Scene::new();
        let camera = small_camera();
        let image = render_scene(&scene, &camera, &small_settings().with_workers(3)).unwrap();

        for x in 0..16 {
            let top = image.get(x, 0);
            let bottom = image.get(x, 8);
            // Higher rows look further up, so they are bluer.
            assert!(top[0] < bottom[0], "x={x}: {top:?} vs {bottom:?}");
            assert_eq!(top[2], 255);
            assert_eq!(top[3], 255);
        }
    }

    #[test]
    fn test_invalid_settings_rejected_before_render() {
        let scene = small_scene();
        let camera = small_camera();
        let mut called = false;

        let result = render_scene_with_progress(
            &scene,
            &camera,
            &small_settings().with_quality(0, 8),
            |_| called = true,
        );
        assert_eq!(result.unwrap_err(), RenderError::InvalidSamples);

        let result = render_scene(&scene, &camera, &small_settings().with_quality(4, 0));
        assert_eq!(result.unwrap_err(), RenderError::InvalidDepth);
        assert!(!called);
    }

    #[test]
    fn test_render_line_is_deterministic() {
        let scene = small_scene();
        let camera = small_camera();
        let item = WorkItem::new(4, &small_settings());

        let a = render_line(&scene, &camera, &item);
        let b = render_line(&scene, &camera, &item);

        assert_eq!(a, b);
        assert_eq!(a.row, 4);
        assert_eq!(a.colors.len(), 16);
    }

    #[test]
    fn test_assemble_accepts_any_order() {
        let (tx, rx) = bounded(3);
        for row in [2u32, 0, 1] {
            let shade = row as u8 * 10;
            tx.send(ProcessedLine {
                row,
                colors: vec![[shade, shade, shade, 255]; 2],
            })
            .unwrap();
        }
        drop(tx);

        let mut image = ImageBuffer::new(2, 3);
        let mut order = Vec::new();
        assemble(&mut image, rx, &mut |p: Progress| order.push(p.row)).unwrap();

        assert_eq!(order, vec![2, 0, 1]);
        assert_eq!(image.get(0, 0), [0, 0, 0, 255]);
        assert_eq!(image.get(1, 1), [10, 10, 10, 255]);
        assert_eq!(image.get(0, 2), [20, 20, 20, 255]);
    }

    #[test]
    fn test_assemble_reports_missing_and_duplicate_rows() {
        let (tx, rx) = bounded(2);
        tx.send(ProcessedLine { row: 0, colors: vec![[0; 4]] }).unwrap();
        drop(tx);
        let mut image = ImageBuffer::new(1, 2);
        assert_eq!(
            assemble(&mut image, rx, &mut |_| {}),
            Err(RenderError::MissingRows(1))
        );

        let (tx, rx) = bounded(2);
        tx.send(ProcessedLine { row: 1, colors: vec![[0; 4]] }).unwrap();
        tx.send(ProcessedLine { row: 1, colors: vec![[0; 4]] }).unwrap();
        drop(tx);
        let mut image = ImageBuffer::new(1, 2);
        assert_eq!(
            assemble(&mut image, rx, &mut |_| {}),
            Err(RenderError::DuplicateRow(1))
        );
    }

    #[test]
    fn test_row_seeds_differ() {
        assert_ne!(row_seed(0, 0), row_seed(0, 1));
        assert_ne!(row_seed(0, 3), row_seed(1, 3));
    }
}
