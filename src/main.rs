use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use rand::prelude::*;

use pathtracer::config::RenderConfig;
use pathtracer::*;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
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

/// Renders a scene of spheres with a Monte Carlo path tracer.
#[derive(Parser, Debug)]
#[command(name = "pathtracer")]
struct Args {
    /// TOML render config. Without one, the random cover scene is rendered.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output image; the format follows the extension (png, jpg, ppm, ...).
    #[arg(short, long, default_value = "image.png")]
    output: PathBuf,

    /// Image width in pixels.
    #[arg(long)]
    width: Option<usize>,

    /// Samples per pixel.
    #[arg(short, long)]
    samples: Option<usize>,

    /// Maximum number of bounces per path.
    #[arg(short, long)]
    depth: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    /// Render on the current thread only.
    #[arg(long)]
    single_threaded: bool,

    /// Per-scanline progress is reported at `debug`.
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level.into())
        .parse_default_env()
        .init();

    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => RenderConfig::default(),
    };
    if let Some(width) = args.width {
        config.image.width = width;
    }
    if let Some(samples) = args.samples {
        config.image.samples_per_pixel = samples;
    }
    if let Some(depth) = args.depth {
        config.image.max_depth = depth;
    }
    if let Some(seed) = args.seed {
        config.image.seed = seed;
    }

    config.validate()?;
    let settings = config.settings()?;
    let camera = config.camera()?;
    let world = config.world()?;
    info!("scene has {} objects", world.len());

    let start = Instant::now();
    let image = if args.single_threaded {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(config.image.seed);
        cast(&settings, &camera, &world, &mut rng)?
    } else {
        par_cast(&settings, &camera, &world, config.image.seed)?
    };
    info!("rendered in {:.2?}", start.elapsed());

    image::save_buffer(
        &args.output,
        &image.to_rgb8(),
        settings.width as u32,
        settings.height as u32,
        image::ColorType::Rgb8,
    )
    .with_context(|| format!("writing {}", args.output.display()))?;
    info!("wrote {}", args.output.display());

    Ok(())
}
