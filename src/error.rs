/// Invalid inputs to the renderer.
///
/// Numerical corner cases hit while tracing (grazing rays, total internal
/// reflection, exhausted bounce budget) are ordinary branches and never show up
/// here. These are caller mistakes, caught before any ray is cast.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Pixel coordinates are normalized by `width - 1` and `height - 1`, so
    /// both dimensions must be at least 2.
    #[error("image must be at least 2x2 pixels, got {width}x{height}")]
    ImageTooSmall { width: usize, height: usize },

    #[error("samples per pixel must be positive")]
    NoSamples,

    #[error("max bounce depth must be positive")]
    NoBounces,

    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f32),

    /// A lens setting that yields no usable rays: a non-positive focus
    /// distance, a field of view outside `(0, 180)` degrees, a negative
    /// aperture, or any non-finite value.
    #[error("camera {name} out of range: {value}")]
    InvalidCamera { name: &'static str, value: f32 },

    #[error("cannot normalize a zero-length vector")]
    DegenerateVector,

    #[error("scene references undefined material {0:?}")]
    UnknownMaterial(String),

    /// The surface normal is divided by the radius, so zero is unusable.
    /// Negative radii are fine (hollow shells).
    #[error("sphere radius must be non-zero and finite, got {0}")]
    InvalidRadius(f32),
}
