use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in procedural scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Ground, three large spheres and a grid of small random spheres
    Random,
    /// The random scene with bouncing diffuse spheres and a [0, 1] shutter
    Motion,
}

#[derive(Debug, Parser)]
#[command(name = "tern")]
#[command(about = "Concurrent CPU path tracer", version)]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Width / height ratio; the height is derived from it
    #[arg(long, default_value_t = 16.0 / 9.0, value_parser = parse_aspect)]
    pub aspect: f64,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value_t = 50)]
    pub samples: u32,

    /// Maximum number of bounces per path
    #[arg(long, default_value_t = 50)]
    pub depth: u32,

    /// Number of worker threads (defaults to every available core)
    #[arg(long)]
    pub ncpu: Option<usize>,

    /// Seed for both scene generation and pixel sampling
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Scene to render
    #[arg(long, value_enum, default_value_t = SceneKind::Random)]
    pub scene: SceneKind,

    /// Output PNG path
    #[arg(short, long, default_value = "image.png")]
    pub output: String,

    /// Logging level (RUST_LOG is used when omitted)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

/// Accept only finite, positive aspect ratios; anything else would derive a
/// zero, saturated or NaN image height.
fn parse_aspect(value: &str) -> Result<f64, String> {
    let aspect: f64 = value
        .parse()
        .map_err(|e| format!("`{value}` is not a number: {e}"))?;
    if aspect.is_finite() && aspect > 0.0 {
        Ok(aspect)
    } else {
        Err(format!("aspect ratio must be a finite number above 0, got {value}"))
    }
}

impl Args {
    /// Image height derived from the width and aspect ratio, at least 1.
    pub fn height(&self) -> u32 {
        ((f64::from(self.width) / self.aspect) as u32).max(1)
    }
}
