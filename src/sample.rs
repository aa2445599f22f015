//! Random sampling helpers.
//!
//! Every function draws from a caller-supplied generator. There is no shared
//! stream: a render thread owns its own `Rng` and passes it down.

use rand::prelude::*;

use crate::vec3::Vec3;

/// Uniform float in `[0, 1)`.
#[inline]
pub fn random_float<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen()
}

/// Uniform float in `[min, max)`.
#[inline]
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + (max - min) * random_float(rng)
}

/// Uniform integer in `[min, max]`, both ends included.
#[inline]
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    rng.gen_range(min..=max)
}

/// Generates a random `Vec3` inside a sphere with unit radius. The length
/// of the result is between 0 and 1.
///
/// Rejection sampling over the cube `[-1, 1)^3`; the sphere fills a bit over
/// half of it, so this takes about two tries on average.
pub fn in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let v = 2. * rng.gen::<Vec3>() - Vec3::from(1.);
        if v.length_squared() < 1. {
            return v;
        }
    }
}

/// Generates a point uniformly distributed on the surface of the unit sphere.
pub fn unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let z = random_range(rng, -1., 1.);
    let a = random_range(rng, 0., 2. * std::f32::consts::PI);
    let r = (1. - z * z).sqrt();
    Vec3(r * a.cos(), r * a.sin(), z)
}

/// Generates a random `Vec3` inside the unit sphere, flipped if necessary so
/// that it lies in the same hemisphere as `normal`.
pub fn in_hemisphere<R: Rng + ?Sized>(normal: Vec3, rng: &mut R) -> Vec3 {
    let v = in_unit_sphere(rng);
    if v.dot(normal) < 0. {
        -v
    } else {
        v
    }
}

/// Generates a random `Vec3` inside a disc with unit radius in the XY
/// plane. The length of the result is between 0 and 1, and the Z component
/// is 0.
pub fn in_unit_disc<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let v = 2. * Vec3(rng.gen(), rng.gen(), 0.) - Vec3(1., 1., 0.);
        if v.length_squared() < 1. {
            return v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0xDEADBEEF)
    }

    #[test]
    fn ranges_are_respected() {
        let mut rng = rng();
        for _ in 0..1000 {
            let f = random_float(&mut rng);
            assert!(f >= 0. && f < 1.);
            let f = random_range(&mut rng, -3., 5.);
            assert!(f >= -3. && f < 5.);
            let i = random_int(&mut rng, -2, 2);
            assert!((-2..=2).contains(&i));
        }
    }

    #[test]
    fn random_int_reaches_both_ends() {
        let mut rng = rng();
        let draws: Vec<_> = (0..200).map(|_| random_int(&mut rng, 0, 1)).collect();
        assert!(draws.contains(&0));
        assert!(draws.contains(&1));
    }

    #[test]
    fn sphere_and_disc_samples_are_inside() {
        let mut rng = rng();
        for _ in 0..1000 {
            assert!(in_unit_sphere(&mut rng).length_squared() < 1.);
            let d = in_unit_disc(&mut rng);
            assert!(d.length_squared() < 1.);
            assert_eq!(d.2, 0.);
        }
    }

    #[test]
    fn unit_vectors_lie_on_the_sphere() {
        let mut rng = rng();
        for _ in 0..1000 {
            assert!((unit_vector(&mut rng).length() - 1.).abs() < 1e-4);
        }
    }

    #[test]
    fn hemisphere_samples_face_the_normal() {
        let mut rng = rng();
        let normal = Vec3(0.3, -0.8, 0.1).into_unit();
        for _ in 0..1000 {
            assert!(in_hemisphere(normal, &mut rng).dot(normal) >= 0.);
        }
    }
}
