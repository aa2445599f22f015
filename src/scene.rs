//! Building scenes.
//!
//! Scenes can come from data (`SceneDescription`, usually deserialized from the
//! `[scene]` table of a config file) or from one of the canned builders below.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;
use rand::prelude::*;
use serde::Deserialize;

use crate::error::RenderError;
use crate::hittable::{HittableList, Sphere};
use crate::material::Material;
use crate::sample;
use crate::vec3::Vec3;

/// Parameters for one material, tagged by `type` in config files.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum MaterialDesc {
    Lambertian {
        albedo: [f32; 3],
    },
    Metal {
        albedo: [f32; 3],
        #[serde(default)]
        fuzz: f32,
    },
    Dielectric {
        ref_idx: f32,
    },
}

impl MaterialDesc {
    pub fn build(&self) -> Material {
        match *self {
            MaterialDesc::Lambertian { albedo } => Material::lambertian(albedo.into()),
            MaterialDesc::Metal { albedo, fuzz } => Material::metal(albedo.into(), fuzz),
            MaterialDesc::Dielectric { ref_idx } => Material::dielectric(ref_idx),
        }
    }
}

/// A sphere referring to a material by name.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SphereDesc {
    pub center: [f32; 3],
    /// May be negative (see `Sphere`) but not zero.
    pub radius: f32,
    pub material: String,
}

/// A scene as plain data: a table of named materials and an ordered list of
/// spheres using them.
///
/// ```
/// use pathtracer::scene::SceneDescription;
///
/// let scene: SceneDescription = toml::from_str(r#"
///     [materials.glass]
///     type = "dielectric"
///     ref_idx = 1.5
///
///     [[spheres]]
///     center = [0.0, 0.0, -1.0]
///     radius = 0.5
///     material = "glass"
///
///     [[spheres]]
///     center = [0.0, 0.0, -1.0]
///     radius = -0.45
///     material = "glass"
/// "#).unwrap();
/// assert_eq!(scene.build().unwrap().len(), 2);
/// ```
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDesc>,
    #[serde(default)]
    pub spheres: Vec<SphereDesc>,
}

impl SceneDescription {
    /// Instantiates the scene. Each named material is built once, and every
    /// sphere naming it shares that instance. Fails on a reference to an
    /// undefined material or a zero (or non-finite) radius.
    pub fn build(&self) -> Result<HittableList, RenderError> {
        let materials: BTreeMap<&str, Arc<Material>> = self
            .materials
            .iter()
            .map(|(name, desc)| (name.as_str(), Arc::new(desc.build())))
            .collect();

        let world = self
            .spheres
            .iter()
            .map(|s| -> Result<Sphere, RenderError> {
                if s.radius == 0. || !s.radius.is_finite() {
                    return Err(RenderError::InvalidRadius(s.radius));
                }
                let material = materials
                    .get(s.material.as_str())
                    .ok_or_else(|| RenderError::UnknownMaterial(s.material.clone()))?;
                Ok(Sphere::new(s.center.into(), s.radius, material.clone()))
            })
            .collect::<Result<HittableList, RenderError>>()?;

        debug!(
            "built scene with {} spheres and {} materials",
            world.len(),
            materials.len()
        );
        Ok(world)
    }
}

/// A small diffuse sphere resting on a huge one that stands in for the ground.
pub fn two_spheres() -> HittableList {
    let mut world = HittableList::new();
    world.add(Sphere::new(
        Vec3(0., -100.5, -1.),
        100.,
        Arc::new(Material::lambertian(Vec3::from(0.5))),
    ));
    world.add(Sphere::new(
        Vec3(0., 0., -1.),
        0.5,
        Arc::new(Material::lambertian(Vec3(0.7, 0.3, 0.3))),
    ));
    world
}

/// One sphere of each material in a row: a hollow glass ball, a matte ball and
/// a polished metal ball.
pub fn showcase() -> HittableList {
    let ground = Arc::new(Material::lambertian(Vec3(0.8, 0.8, 0.)));
    let center = Arc::new(Material::lambertian(Vec3(0.1, 0.2, 0.5)));
    let glass = Arc::new(Material::dielectric(1.5));
    let metal = Arc::new(Material::metal(Vec3(0.8, 0.6, 0.2), 0.));

    vec![
        Sphere::new(Vec3(0., -100.5, -1.), 100., ground),
        Sphere::new(Vec3(0., 0., -1.), 0.5, center),
        Sphere::new(Vec3(-1., 0., -1.), 0.5, glass.clone()),
        Sphere::new(Vec3(-1., 0., -1.), -0.45, glass),
        Sphere::new(Vec3(1., 0., -1.), 0.5, metal),
    ]
    .into_iter()
    .collect()
}

/// The cover image: a field of small random spheres around three big ones.
pub fn random_scene(rng: &mut impl Rng) -> HittableList {
    let mut world = HittableList::new();
    world.add(Sphere::new(
        Vec3(0., -1000., 0.),
        1000.,
        Arc::new(Material::lambertian(Vec3::from(0.5))),
    ));

    let glass = Arc::new(Material::dielectric(1.5));

    for a in -11..11 {
        for b in -11..11 {
            let center = Vec3(
                a as f32 + 0.9 * sample::random_float(rng),
                0.2,
                b as f32 + 0.9 * sample::random_float(rng),
            );
            if (center - Vec3(4., 0.2, 0.)).length() <= 0.9 {
                continue;
            }

            let choose_mat = sample::random_float(rng);
            let material = if choose_mat < 0.8 {
                Arc::new(Material::lambertian(rng.gen::<Vec3>() * rng.gen::<Vec3>()))
            } else if choose_mat < 0.95 {
                Arc::new(Material::metal(
                    0.5 * (1. + rng.gen::<Vec3>()),
                    sample::random_range(rng, 0., 0.5),
                ))
            } else {
                glass.clone()
            };
            world.add(Sphere::new(center, 0.2, material));
        }
    }

    world.add(Sphere::new(Vec3(0., 1., 0.), 1., glass));
    world.add(Sphere::new(
        Vec3(-4., 1., 0.),
        1.,
        Arc::new(Material::lambertian(Vec3(0.4, 0.2, 0.1))),
    ));
    world.add(Sphere::new(
        Vec3(4., 1., 0.),
        1.,
        Arc::new(Material::metal(Vec3(0.7, 0.6, 0.5), 0.)),
    ));

    debug!("generated random scene with {} spheres", world.len());
    world
}
