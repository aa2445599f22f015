use rand::prelude::*;

use crate::hittable::HitRecord;
use crate::ray::Ray;
use crate::sample;
use crate::vec3::{reflect, refract, Vec3};

/// Material options for a rendered object.
///
/// Materials are immutable once built and are shared between objects through
/// `Arc`, so any number of spheres can point at the same instance.
#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    /// An opaque material with a matte surface, where lighting is calculated
    /// using [Lambertian reflectance][lambert].
    ///
    /// [lambert]: https://en.wikipedia.org/wiki/Lambertian_reflectance
    Lambertian { albedo: Vec3 },
    /// A reflective material that looks like polished or frosted metal.
    Metal {
        /// The amount of light energy reflected in each color component, so
        /// `Vec3(1., 1., 1.)` is a white surface, and `Vec3(0., 0., 0.)` is
        /// totally black.
        albedo: Vec3,
        /// The amount of randomness introduced into reflected rays. A `fuzz` of
        /// 0 makes the surface look polished and mirror-smooth, while a `fuzz`
        /// of 1 produces a frosted, almost matte surface.
        fuzz: f32,
    },
    /// A transparent refractive material like glass or water.
    Dielectric {
        /// [Refractive index][ref-idx] of the material, which determines how
        /// much light is bent when traveling into or out of an object.
        ///
        /// [ref-idx]: https://en.wikipedia.org/wiki/Refractive_index
        ref_idx: f32,
    },
}

impl Material {
    pub fn lambertian(albedo: Vec3) -> Self {
        Material::Lambertian { albedo }
    }

    /// Makes a metal, clamping `fuzz` into `[0, 1]`.
    pub fn metal(albedo: Vec3, fuzz: f32) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.max(0.).min(1.),
        }
    }

    pub fn dielectric(ref_idx: f32) -> Self {
        Material::Dielectric { ref_idx }
    }

    /// Performs surface scattering from a material.
    ///
    /// When light traveling along `ray` reaches a surface made out of this
    /// material (intersection described by `hit`), some of it will be absorbed,
    /// and the rest will either be reflected or refracted. If 100% of the light
    /// is absorbed, `scatter` returns `None`; otherwise, it returns a new `Ray`
    /// giving the reflected/refracted direction of the light, and a `Vec3` with
    /// the amount of energy reflected/refracted in each of red, green, and
    /// blue.
    ///
    /// (In reality, light would be *both* reflected and refracted, but we
    /// choose one or the other randomly and use over-sampling to produce a
    /// blend.)
    pub fn scatter<R: Rng + ?Sized>(
        &self,
        ray: &Ray,
        hit: &HitRecord,
        rng: &mut R,
    ) -> Option<(Ray, Vec3)> {
        match self {
            Material::Lambertian { albedo } => {
                // A near-zero direction is possible when the sample almost
                // cancels the normal. Left alone.
                let scattered = Ray {
                    origin: hit.p,
                    direction: hit.normal + sample::in_hemisphere(hit.normal, rng),
                };
                Some((scattered, *albedo))
            }
            Material::Metal { albedo, fuzz } => {
                let scattered = Ray {
                    origin: hit.p,
                    direction: reflect(ray.direction.into_unit(), hit.normal)
                        + *fuzz * sample::in_hemisphere(hit.normal, rng),
                };
                if scattered.direction.dot(hit.normal) > 0. {
                    Some((scattered, *albedo))
                } else {
                    // Fuzz pushed the ray below the surface; absorbed.
                    None
                }
            }
            Material::Dielectric { ref_idx } => {
                let refraction_ratio = if hit.front_face {
                    1. / *ref_idx
                } else {
                    *ref_idx
                };

                let unit_direction = ray.direction.into_unit();
                let cos_theta = f32::min((-unit_direction).dot(hit.normal), 1.);
                let sin_theta = (1. - cos_theta * cos_theta).sqrt();

                let cannot_refract = refraction_ratio * sin_theta > 1.;
                let direction = if cannot_refract
                    || schlick(cos_theta, *ref_idx) > sample::random_float(rng)
                {
                    reflect(unit_direction, hit.normal)
                } else {
                    refract(unit_direction, hit.normal, refraction_ratio)
                };

                Some((
                    Ray {
                        origin: hit.p,
                        direction,
                    },
                    Vec3::from(1.),
                ))
            }
        }
    }
}

/// [Schlick's approximation][schlick] for computing reflection vs. refraction
/// at a material surface.
///
/// `r0` only depends on the ratio of the two indices up to inversion, so
/// passing the material's own index gives the same answer from either side.
///
/// [schlick]: https://en.wikipedia.org/wiki/Schlick%27s_approximation
#[inline]
fn schlick(cos: f32, ref_idx: f32) -> f32 {
    let r0 = (1. - ref_idx) / (1. + ref_idx);
    let r0 = r0 * r0;
    r0 + (1. - r0) * f32::powf(1. - cos, 5.)
}
