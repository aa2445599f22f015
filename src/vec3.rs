use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Index, Mul, Neg, Sub};

use rand::distributions::{Distribution, Standard};
use rand::prelude::*;

use crate::error::RenderError;

/// Three `f32` lanes. The same type serves as a point, a direction and a
/// linear RGB colour; colours are never clamped until quantization.
///
/// Lanes are reachable as `v.0`/`v.1`/`v.2`, or by name through the `Index`
/// impls: `v[X]` with `Axis::*` in scope, `v[R]` with `Channel::*`.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct Vec3(pub f32, pub f32, pub f32);

impl Vec3 {
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.zip_with(other, Mul::mul).reduce(Add::add)
    }

    /// Right-handed cross product.
    ///
    /// ```
    /// use pathtracer::vec3::Vec3;
    ///
    /// let x = Vec3(1., 0., 0.);
    /// let y = Vec3(0., 1., 0.);
    /// assert_eq!(x.cross(&y), Vec3(0., 0., 1.));
    /// assert_eq!(y.cross(&x), Vec3(0., 0., -1.));
    /// ```
    pub fn cross(&self, other: &Self) -> Self {
        Vec3(
            self.1 * other.2 - self.2 * other.1,
            self.2 * other.0 - self.0 * other.2,
            self.0 * other.1 - self.1 * other.0,
        )
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Skips the square root; enough for comparing lengths.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// Scales `self` to length 1 without changing its direction.
    ///
    /// Callers guarantee a non-zero input; directions derived from user
    /// input go through `try_into_unit` instead.
    pub fn into_unit(self) -> Self {
        debug_assert!(
            self.length_squared() > 0.,
            "normalizing a zero-length vector"
        );
        self / self.length()
    }

    /// Fallible `into_unit`: zero or non-finite length is an error rather
    /// than a vector of NaNs.
    pub fn try_into_unit(self) -> Result<Self, RenderError> {
        let len = self.length();
        if len > 0. && len.is_finite() {
            Ok(self / len)
        } else {
            Err(RenderError::DegenerateVector)
        }
    }

    /// Lane-wise `f(self)`.
    #[inline]
    pub fn map(self, mut f: impl FnMut(f32) -> f32) -> Self {
        Vec3(f(self.0), f(self.1), f(self.2))
    }

    /// Lane-wise `f(self, other)`.
    #[inline]
    pub fn zip_with(self, other: Vec3, mut f: impl FnMut(f32, f32) -> f32) -> Self {
        Vec3(f(self.0, other.0), f(self.1, other.1), f(self.2, other.2))
    }

    /// Folds the three lanes left to right.
    #[inline]
    pub fn reduce(self, f: impl Fn(f32, f32) -> f32) -> f32 {
        f(f(self.0, self.1), self.2)
    }
}

/// Same value in every lane, e.g. a grey albedo.
impl From<f32> for Vec3 {
    #[inline]
    fn from(v: f32) -> Self {
        Vec3(v, v, v)
    }
}

/// Config files write vectors as `[x, y, z]`.
impl From<[f32; 3]> for Vec3 {
    #[inline]
    fn from([x, y, z]: [f32; 3]) -> Self {
        Vec3(x, y, z)
    }
}

/// Lane-wise product. This is how attenuation tints light.
impl Mul for Vec3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.zip_with(rhs, Mul::mul)
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs.map(|x| self * x)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        rhs * self
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;

    #[inline]
    fn div(self, rhs: f32) -> Vec3 {
        self.map(|x| x / rhs)
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        self.zip_with(rhs, Add::add)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

/// Adds the scalar to every lane.
impl Add<Vec3> for f32 {
    type Output = Vec3;

    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        rhs.map(|x| self + x)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        self.zip_with(rhs, Sub::sub)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    #[inline]
    fn neg(self) -> Vec3 {
        self.map(Neg::neg)
    }
}

/// Used to total per-pixel samples.
impl Sum for Vec3 {
    #[inline]
    fn sum<I: Iterator<Item = Vec3>>(iter: I) -> Vec3 {
        iter.fold(Vec3::default(), Add::add)
    }
}

/// `rng.gen::<Vec3>()` draws each lane independently from `[0, 1)`. Handy for
/// random colours; not a direction.
impl Distribution<Vec3> for Standard {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        Vec3(rng.gen(), rng.gen(), rng.gen())
    }
}

/// Colour lane names for indexing.
///
/// ```
/// use pathtracer::vec3::{Vec3, Channel::*};
///
/// let c = Vec3(0.25, 0.5, 1.);
/// assert_eq!((c[R], c[G], c[B]), (0.25, 0.5, 1.));
/// ```
#[derive(Copy, Clone, Debug)]
pub enum Channel {
    R,
    G,
    B,
}

impl Index<Channel> for Vec3 {
    type Output = f32;

    fn index(&self, channel: Channel) -> &f32 {
        match channel {
            Channel::R => &self.0,
            Channel::G => &self.1,
            Channel::B => &self.2,
        }
    }
}

/// Coordinate lane names for indexing.
///
/// ```
/// use pathtracer::vec3::{Vec3, Axis::*};
///
/// let p = Vec3(-1., 0., 4.);
/// assert_eq!((p[X], p[Y], p[Z]), (-1., 0., 4.));
/// ```
#[derive(Copy, Clone, Debug)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Index<Axis> for Vec3 {
    type Output = f32;

    fn index(&self, axis: Axis) -> &f32 {
        match axis {
            Axis::X => &self.0,
            Axis::Y => &self.1,
            Axis::Z => &self.2,
        }
    }
}

/// Mirror image of `v` in the plane with unit normal `n`.
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2. * v.dot(n) * n
}

/// Bends the unit direction `uv` through a boundary with unit normal `n`
/// (Snell's law). `etai_over_etat` is the incident index over the transmitted
/// one. Total internal reflection must be ruled out by the caller; this
/// always returns a direction.
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = f32::min((-uv).dot(n), 1.);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1. - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
