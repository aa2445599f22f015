#![deny(unsafe_code)]

pub mod camera;
pub mod config;
pub mod error;
pub mod hittable;
pub mod material;
pub mod ray;
pub mod sample;
pub mod scene;
pub mod vec3;

use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, info};
use rand::prelude::*;
use rand::rngs::SmallRng;
use rayon::prelude::*;

pub use crate::camera::Camera;
pub use crate::error::RenderError;
use crate::hittable::Hittable;
use crate::ray::Ray;
use crate::vec3::{Channel::*, *};

/// Hits closer than this are ignored, so a scattered ray can't immediately
/// re-hit the surface it left because of rounding ("shadow acne").
pub const NEAR: f32 = 0.001;

/// Computes the color seen along `ray` in the scene `world`, following at most
/// `depth` bounces.
///
/// This is the actual ray-tracing routine. Light is gathered backwards: each
/// surface the ray reaches scales whatever arrives from further along the
/// path by its attenuation. Running out of bounces, or hitting a surface that
/// absorbs the ray, contributes black.
pub fn ray_colour<W, R>(world: &W, ray: &Ray, depth: u32, rng: &mut R) -> Vec3
where
    W: Hittable + ?Sized,
    R: Rng + ?Sized,
{
    if depth == 0 {
        return Vec3::default();
    }

    match world.hit(ray, NEAR..f32::INFINITY) {
        Some(hit) => match hit.material.scatter(ray, &hit, rng) {
            Some((scattered, attenuation)) => {
                attenuation * ray_colour(world, &scattered, depth - 1, rng)
            }
            None => Vec3::default(),
        },
        None => background(ray),
    }
}

/// The sky: a vertical blend from white at the bottom to light blue at the
/// top, depending only on the ray's direction.
pub fn background(ray: &Ray) -> Vec3 {
    let unit_direction = ray.direction.into_unit();
    let t = 0.5 * (unit_direction.1 + 1.);
    (1. - t) * Vec3::from(1.) + t * Vec3(0.5, 0.7, 1.)
}

/// Image dimensions and sampling budget for a render.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderSettings {
    pub width: usize,
    pub height: usize,
    pub samples_per_pixel: usize,
    pub max_depth: u32,
}

impl RenderSettings {
    /// Derives the image height from `width` and `aspect` (width over
    /// height), rounding down.
    pub fn with_aspect(
        width: usize,
        aspect: f32,
        samples_per_pixel: usize,
        max_depth: u32,
    ) -> Result<Self, RenderError> {
        if !(aspect > 0. && aspect.is_finite()) {
            return Err(RenderError::InvalidAspectRatio(aspect));
        }
        let settings = RenderSettings {
            width,
            height: (width as f32 / aspect) as usize,
            samples_per_pixel,
            max_depth,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Checks the preconditions of `cast` and `par_cast`.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width < 2 || self.height < 2 {
            return Err(RenderError::ImageTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::NoSamples);
        }
        if self.max_depth == 0 {
            return Err(RenderError::NoBounces);
        }
        Ok(())
    }
}

/// Sums `samples_per_pixel` jittered samples for the pixel at column `x`, row
/// `y` (counting up from the bottom of the image). `settings` must already
/// have passed `validate`.
pub fn sample_pixel<W, R>(
    settings: &RenderSettings,
    camera: &Camera,
    world: &W,
    x: usize,
    y: usize,
    rng: &mut R,
) -> Vec3
where
    W: Hittable + ?Sized,
    R: Rng + ?Sized,
{
    let x_scale = (settings.width - 1) as f32;
    let y_scale = (settings.height - 1) as f32;
    (0..settings.samples_per_pixel)
        .map(|_| {
            let u = (x as f32 + sample::random_float(rng)) / x_scale;
            let v = (y as f32 + sample::random_float(rng)) / y_scale;
            let r = camera.get_ray(u, v, rng);
            ray_colour(world, &r, settings.max_depth, rng)
        })
        .sum()
}

/// A rendered image, holding the *sum* of all samples taken for each pixel.
/// Scanlines are stored top first.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    rows: Vec<Vec<Vec3>>,
    samples_per_pixel: usize,
}

/// Scanline countdown, shared between render threads.
#[derive(Debug)]
struct Progress {
    remaining: AtomicUsize,
}

impl Progress {
    fn new(scanlines: usize) -> Self {
        Progress {
            remaining: AtomicUsize::new(scanlines),
        }
    }

    /// Marks one scanline finished and returns how many are left.
    fn scanline_done(&self) -> usize {
        let left = self
            .remaining
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .map_or(0, |before| before - 1);
        debug!("scanlines remaining: {}", left);
        left
    }
}

impl Image {
    /// Evaluates `f(x, y, rng)` for every pixel in parallel, one scanline per
    /// task. Each scanline draws from its own generator seeded from `seed` and
    /// the row index, so the result doesn't depend on scheduling.
    pub fn par_compute(
        nx: usize,
        ny: usize,
        samples_per_pixel: usize,
        seed: u64,
        f: impl Fn(usize, usize, &mut SmallRng) -> Vec3 + Sync,
    ) -> Image {
        let progress = Progress::new(ny);
        Image {
            rows: (0..ny)
                .into_par_iter()
                .rev()
                .map(|y| {
                    let mut rng = scanline_rng(seed, y);
                    let row: Vec<Vec3> = (0..nx).map(|x| f(x, y, &mut rng)).collect();
                    progress.scanline_done();
                    row
                })
                .collect(),
            samples_per_pixel,
        }
    }

    pub fn compute(
        nx: usize,
        ny: usize,
        samples_per_pixel: usize,
        mut f: impl FnMut(usize, usize) -> Vec3,
    ) -> Image {
        let progress = Progress::new(ny);
        Image {
            rows: (0..ny)
                .rev()
                .map(|y| {
                    let row: Vec<Vec3> = (0..nx).map(|x| f(x, y)).collect();
                    progress.scanline_done();
                    row
                })
                .collect(),
            samples_per_pixel,
        }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Accumulated color at column `x`, row `y` counted from the top.
    pub fn pixel_sum(&self, x: usize, y: usize) -> Vec3 {
        self.rows[y][x]
    }

    /// Flattens the image into 8-bit RGB triples, row-major, top scanline
    /// first: `width * height * 3` bytes, ready for an image encoder.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.width() * self.height() * 3);
        for scanline in &self.rows {
            for &col in scanline {
                bytes.extend_from_slice(&quantize(col, self.samples_per_pixel));
            }
        }
        bytes
    }
}

/// Averages a pixel's accumulated color over `samples_per_pixel` and
/// converts each channel to a byte. No gamma correction is applied.
pub fn quantize(sum: Vec3, samples_per_pixel: usize) -> [u8; 3] {
    let col = sum / samples_per_pixel as f32;

    fn to_u8(x: f32) -> u8 {
        // 0.999 keeps 256 * x below 256.
        (256. * x.max(0.).min(0.999)) as u8
    }

    [to_u8(col[R]), to_u8(col[G]), to_u8(col[B])]
}

fn scanline_rng(seed: u64, y: usize) -> SmallRng {
    SmallRng::seed_from_u64(seed ^ (y as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Renders `world` as seen by `camera` using every available core.
///
/// Output is a pure function of the inputs and `seed`.
pub fn par_cast<W: Hittable + ?Sized>(
    settings: &RenderSettings,
    camera: &Camera,
    world: &W,
    seed: u64,
) -> Result<Image, RenderError> {
    settings.validate()?;
    info!(
        "rendering {}x{} at {} samples/pixel, {} bounces, {} threads",
        settings.width,
        settings.height,
        settings.samples_per_pixel,
        settings.max_depth,
        rayon::current_num_threads(),
    );
    let image = Image::par_compute(
        settings.width,
        settings.height,
        settings.samples_per_pixel,
        seed,
        |x, y, rng| sample_pixel(settings, camera, world, x, y, rng),
    );
    info!("render complete");
    Ok(image)
}

/// Renders `world` as seen by `camera` on the current thread, drawing every
/// sample from `rng`.
pub fn cast<W: Hittable + ?Sized>(
    settings: &RenderSettings,
    camera: &Camera,
    world: &W,
    rng: &mut impl Rng,
) -> Result<Image, RenderError> {
    settings.validate()?;
    info!(
        "rendering {}x{} at {} samples/pixel, {} bounces, single-threaded",
        settings.width, settings.height, settings.samples_per_pixel, settings.max_depth,
    );
    let image = Image::compute(
        settings.width,
        settings.height,
        settings.samples_per_pixel,
        |x, y| sample_pixel(settings, camera, world, x, y, rng),
    );
    info!("render complete");
    Ok(image)
}
