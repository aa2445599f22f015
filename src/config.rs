//! Render configuration, as read from a TOML file.
//!
//! Every field has a default, so an empty file (or no file at all) renders the
//! random cover scene. A complete config looks like:
//!
//! ```toml
//! [image]
//! width = 400
//! aspect_ratio = 1.7777778
//! samples_per_pixel = 100
//! max_depth = 50
//! seed = 42
//!
//! [camera]
//! look_from = [-2.0, 2.0, 1.0]
//! look_at = [0.0, 0.0, -1.0]
//! up = [0.0, 1.0, 0.0]
//! vfov = 20.0
//! aperture = 0.0
//! focus_dist = 3.4
//!
//! [scene]
//! kind = "showcase"
//! ```
//!
//! `kind` is one of `random`, `two_spheres`, `showcase` or `custom`; a custom
//! scene lists its materials and spheres inline (see `SceneDescription`).

use std::path::Path;

use log::debug;
use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::Deserialize;

use crate::camera::Camera;
use crate::error::RenderError;
use crate::hittable::HittableList;
use crate::scene::{self, SceneDescription};
use crate::vec3::Vec3;
use crate::RenderSettings;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("can't read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("can't parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] RenderError),
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub image: ImageConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
    pub width: usize,
    /// Width over height. The height is derived from this.
    pub aspect_ratio: f32,
    pub samples_per_pixel: usize,
    pub max_depth: u32,
    /// Seeds every random stream used by the render, including random scene
    /// generation.
    pub seed: u64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        ImageConfig {
            width: 1200,
            aspect_ratio: 3. / 2.,
            samples_per_pixel: 10,
            max_depth: 50,
            seed: 0xDEADBEEF,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub look_from: [f32; 3],
    pub look_at: [f32; 3],
    pub up: [f32; 3],
    /// Vertical field of view, in degrees.
    pub vfov: f32,
    pub aperture: f32,
    pub focus_dist: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            look_from: [13., 2., 3.],
            look_at: [0., 0., 0.],
            up: [0., 1., 0.],
            vfov: 20.,
            aperture: 0.1,
            focus_dist: 10.,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneConfig {
    Random,
    TwoSpheres,
    Showcase,
    Custom(SceneDescription),
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig::Random
    }
}

impl CameraConfig {
    fn check_lens(&self) -> Result<(), RenderError> {
        let invalid = |name, value| Err(RenderError::InvalidCamera { name, value });

        let points = [
            ("look_from", self.look_from),
            ("look_at", self.look_at),
            ("up", self.up),
        ];
        for (name, point) in points {
            if let Some(&x) = point.iter().find(|x| !x.is_finite()) {
                return invalid(name, x);
            }
        }
        // Comparisons are false for NaN, so these reject it too.
        if !(self.vfov > 0. && self.vfov < 180.) {
            return invalid("vfov", self.vfov);
        }
        if !(self.aperture >= 0. && self.aperture.is_finite()) {
            return invalid("aperture", self.aperture);
        }
        if !(self.focus_dist > 0. && self.focus_dist.is_finite()) {
            return invalid("focus_dist", self.focus_dist);
        }
        Ok(())
    }
}

impl RenderConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("loading config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Checks every setting without rendering anything: image size and
    /// sampling, the camera, and for custom scenes the spheres and their
    /// material references. `settings`, `camera` and `world` each apply the
    /// checks for their own part.
    pub fn validate(&self) -> Result<(), RenderError> {
        self.settings()?;
        self.camera()?;
        if let SceneConfig::Custom(desc) = &self.scene {
            desc.build()?;
        }
        Ok(())
    }

    pub fn settings(&self) -> Result<RenderSettings, RenderError> {
        RenderSettings::with_aspect(
            self.image.width,
            self.image.aspect_ratio,
            self.image.samples_per_pixel,
            self.image.max_depth,
        )
    }

    /// Builds the camera, refusing setups with no well-defined orientation
    /// (looking at the eye point itself, or `up` parallel to the view) and
    /// lens settings that can't produce a ray.
    pub fn camera(&self) -> Result<Camera, RenderError> {
        let c = &self.camera;
        c.check_lens()?;
        let look_from = Vec3::from(c.look_from);
        let look_at = Vec3::from(c.look_at);
        let up = Vec3::from(c.up);

        let w = (look_from - look_at).try_into_unit()?;
        up.cross(&w).try_into_unit()?;
        if !(self.image.aspect_ratio > 0. && self.image.aspect_ratio.is_finite()) {
            return Err(RenderError::InvalidAspectRatio(self.image.aspect_ratio));
        }

        Ok(Camera::look(
            look_from,
            look_at,
            up,
            c.vfov,
            self.image.aspect_ratio,
            c.aperture,
            c.focus_dist,
        ))
    }

    pub fn world(&self) -> Result<HittableList, RenderError> {
        match &self.scene {
            SceneConfig::Random => {
                let mut rng = SmallRng::seed_from_u64(self.image.seed);
                Ok(scene::random_scene(&mut rng))
            }
            SceneConfig::TwoSpheres => Ok(scene::two_spheres()),
            SceneConfig::Showcase => Ok(scene::showcase()),
            SceneConfig::Custom(desc) => desc.build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_the_cover_scene() {
        let config = RenderConfig::from_toml("").unwrap();
        assert_eq!(config, RenderConfig::default());
        assert_eq!(config.scene, SceneConfig::Random);

        let settings = config.settings().unwrap();
        assert_eq!((settings.width, settings.height), (1200, 800));
        assert!(config.camera().is_ok());
        assert!(config.world().unwrap().len() > 400);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = RenderConfig::from_toml(
            r#"
            [image]
            width = 320
            samples_per_pixel = 4

            [scene]
            kind = "two_spheres"
            "#,
        )
        .unwrap();
        assert_eq!(config.image.width, 320);
        assert_eq!(config.image.max_depth, 50);
        assert_eq!(config.camera, CameraConfig::default());
        assert_eq!(config.world().unwrap().len(), 2);
        assert_eq!(config.settings().unwrap().height, 213);
    }

    #[test]
    fn custom_scene_inline() {
        let config = RenderConfig::from_toml(
            r#"
            [scene]
            kind = "custom"

            [scene.materials.red]
            type = "lambertian"
            albedo = [0.9, 0.1, 0.1]

            [[scene.spheres]]
            center = [0.0, 0.0, -1.0]
            radius = 0.5
            material = "red"
            "#,
        )
        .unwrap();
        assert_eq!(config.world().unwrap().len(), 1);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            RenderConfig::from_toml("[image]\nwidht = 3\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            RenderConfig::from_toml("[scene]\nkind = \"cornell_box\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn degenerate_camera_is_rejected() {
        let mut config = RenderConfig::default();
        config.camera.look_at = config.camera.look_from;
        assert_eq!(config.camera().unwrap_err(), RenderError::DegenerateVector);

        let mut config = RenderConfig::default();
        config.camera.up = [13., 2., 3.];
        assert_eq!(config.camera().unwrap_err(), RenderError::DegenerateVector);
    }

    #[test]
    fn bad_image_settings_are_rejected() {
        let mut config = RenderConfig::default();
        config.image.samples_per_pixel = 0;
        assert_eq!(config.settings(), Err(RenderError::NoSamples));

        config.image.samples_per_pixel = 1;
        config.image.aspect_ratio = -1.;
        assert_eq!(config.settings(), Err(RenderError::InvalidAspectRatio(-1.)));
        assert_eq!(config.camera().unwrap_err(), RenderError::InvalidAspectRatio(-1.));
    }

    #[test]
    fn lens_settings_are_checked() {
        // No lens and no focus distance: every ray would have zero length.
        let config = RenderConfig::from_toml("[camera]\naperture = 0.0\nfocus_dist = 0.0\n").unwrap();
        assert_eq!(
            config.camera().unwrap_err(),
            RenderError::InvalidCamera {
                name: "focus_dist",
                value: 0.
            }
        );
        assert!(matches!(config.validate(), Err(RenderError::InvalidCamera { .. })));

        let config = RenderConfig::from_toml("[camera]\nvfov = 180.0\n").unwrap();
        assert_eq!(
            config.camera().unwrap_err(),
            RenderError::InvalidCamera {
                name: "vfov",
                value: 180.
            }
        );

        let mut config = RenderConfig::default();
        config.camera.vfov = 0.;
        assert!(config.camera().is_err());
        config.camera.vfov = 90.;
        config.camera.aperture = -0.5;
        assert!(config.camera().is_err());
        config.camera.aperture = 0.;
        config.camera.focus_dist = -1.;
        assert!(config.camera().is_err());
        config.camera.focus_dist = 1.;
        assert!(config.camera().is_ok());
    }

    #[test]
    fn non_finite_camera_values_are_rejected() {
        let config = RenderConfig::from_toml("[camera]\nfocus_dist = inf\n").unwrap();
        assert!(matches!(
            config.camera(),
            Err(RenderError::InvalidCamera { name: "focus_dist", .. })
        ));

        let config = RenderConfig::from_toml("[camera]\nvfov = nan\n").unwrap();
        assert!(matches!(
            config.camera(),
            Err(RenderError::InvalidCamera { name: "vfov", .. })
        ));

        let mut config = RenderConfig::default();
        config.camera.look_from = [f32::NAN, 2., 3.];
        assert!(matches!(
            config.camera(),
            Err(RenderError::InvalidCamera { name: "look_from", .. })
        ));
    }

    #[test]
    fn validate_covers_every_section() {
        assert_eq!(RenderConfig::default().validate(), Ok(()));

        let mut config = RenderConfig::default();
        config.image.width = 1;
        assert!(matches!(config.validate(), Err(RenderError::ImageTooSmall { .. })));

        let config = RenderConfig::from_toml(
            r#"
            [scene]
            kind = "custom"

            [[scene.spheres]]
            center = [0.0, 0.0, -1.0]
            radius = 0.5
            material = "missing"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.validate(),
            Err(RenderError::UnknownMaterial("missing".to_string()))
        );
    }

    #[test]
    fn misspelled_scene_keys_are_rejected() {
        // `sphere` instead of `spheres` would otherwise render an empty sky.
        let typo = r#"
            [scene]
            kind = "custom"

            [[scene.sphere]]
            center = [0.0, 0.0, -1.0]
            radius = 0.5
            material = "red"
            "#;
        assert!(matches!(RenderConfig::from_toml(typo), Err(ConfigError::Parse(_))));

        let typo = r#"
            [scene]
            kind = "custom"

            [scene.materials.chrome]
            type = "metal"
            albedo = [0.8, 0.8, 0.8]
            fuz = 0.3
            "#;
        assert!(matches!(RenderConfig::from_toml(typo), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            RenderConfig::load("/nonexistent/render.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
