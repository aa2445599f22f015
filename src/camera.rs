use rand::prelude::*;

use crate::ray::Ray;
use crate::sample;
use crate::vec3::{Axis::*, Vec3};

/// A thin-lens camera. Built once per render and only read afterwards.
#[derive(Clone, Debug)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Points a camera at `look_at` from `look_from`, rolled so that `up`
    /// appears upward. `fov` is the vertical field of view in degrees and
    /// `aspect` is width over height.
    ///
    /// Objects `focus_dist` away from `look_from` are in perfect focus; the
    /// rest blur in proportion to `aperture`, the diameter of the lens. An
    /// aperture of zero gives a pinhole camera.
    pub fn look(
        look_from: Vec3,
        look_at: Vec3,
        up: Vec3,
        fov: f32,
        aspect: f32,
        aperture: f32,
        focus_dist: f32,
    ) -> Self {
        let lens_radius = aperture / 2.;
        let theta = fov.to_radians();
        let viewport_height = 2. * f32::tan(theta / 2.);
        let viewport_width = aspect * viewport_height;

        let origin = look_from;
        let w = (look_from - look_at).into_unit();
        let u = up.cross(&w).into_unit();
        let v = w.cross(&u);

        let horizontal = focus_dist * viewport_width * u;
        let vertical = focus_dist * viewport_height * v;
        let lower_left_corner = origin - horizontal / 2. - vertical / 2. - focus_dist * w;
        Camera {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            lens_radius,
        }
    }

    /// Generates a ray through the viewport at `(s, t)`, where `(0, 0)` is the
    /// lower left corner and `(1, 1)` the upper right. The origin is jittered
    /// across the lens for depth of field.
    pub fn get_ray<R: Rng + ?Sized>(&self, s: f32, t: f32, rng: &mut R) -> Ray {
        let rd = self.lens_radius * sample::in_unit_disc(rng);
        let offset = rd[X] * self.u + rd[Y] * self.v;
        Ray {
            origin: self.origin + offset,
            direction: self.lower_left_corner + s * self.horizontal + t * self.vertical
                - self.origin
                - offset,
        }
    }
}
