use std::ops::Range;
use std::sync::Arc;

use crate::material::Material;
use crate::ray::Ray;
use crate::vec3::Vec3;

/// Something in a scene that rays can hit.
pub trait Hittable: std::fmt::Debug + Sync + Send {
    /// Tests if `ray` intersects the object `self`, and if so, if that
    /// intersection occurs strictly inside `t_range` along the ray. (Recall
    /// that `Ray` is defined in terms of a `t` value that refers to points
    /// along the ray.)
    ///
    /// The `t_range` serves two purposes here. First, if the intersection
    /// occurs at *negative* `t`, the object is behind the photons instead of in
    /// front of them, and the intersection is an illusion. Second, while the
    /// upper end of `t_range` starts out as infinity, we adjust it down as we
    /// find objects along `ray`. Once we've found an object at position `t`, we
    /// can ignore any objects at positions greater than `t`.
    fn hit<'o>(&'o self, ray: &Ray, t_range: Range<f32>) -> Option<HitRecord<'o>>;
}

/// A description of a `Ray` hitting an object. This stores information needed
/// for rendering later.
///
/// The `'m` lifetime refers to the `Material` of the object, which we borrow
/// out of its shared handle. Thus, a `HitRecord` cannot outlive the object it
/// refers to.
#[derive(Clone, Debug)]
pub struct HitRecord<'m> {
    /// Position along the ray, expressed as the ray parameter.
    pub t: f32,
    /// Position along the ray, as an actual point.
    pub p: Vec3,
    /// Surface normal at the hit position, always facing against the incoming
    /// ray.
    pub normal: Vec3,
    /// Whether the ray struck the outside of the surface, as judged by the
    /// surface's own outward normal.
    pub front_face: bool,
    /// Material of the object at the hit position.
    pub material: &'m Material,
}

impl<'m> HitRecord<'m> {
    /// Builds a record from the geometric outward normal, flipping it to face
    /// the ray when we've hit the back side.
    pub fn with_face_normal(
        ray: &Ray,
        t: f32,
        p: Vec3,
        outward_normal: Vec3,
        material: &'m Material,
    ) -> Self {
        let front_face = ray.direction.dot(outward_normal) < 0.;
        HitRecord {
            t,
            p,
            normal: if front_face {
                outward_normal
            } else {
                -outward_normal
            },
            front_face,
            material,
        }
    }
}

/// A sphere.
///
/// A negative `radius` turns the sphere inside out: the surface is in the same
/// place, but its outward normal points toward the centre. Nested inside a
/// regular glass sphere, this makes a hollow glass shell. The radius must not
/// be zero; normals are divided by it. `SceneDescription::build` enforces this
/// for scenes read from config.
#[derive(Debug, Clone)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: Arc<Material>,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        debug_assert!(radius != 0., "zero-radius sphere");
        Sphere {
            center,
            radius,
            material,
        }
    }
}

impl Hittable for Sphere {
    #[inline]
    fn hit<'o>(&'o self, ray: &Ray, t_range: Range<f32>) -> Option<HitRecord<'o>> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let half_b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;
        let discriminant = half_b * half_b - a * c;
        if discriminant < 0. {
            return None;
        }

        let root = discriminant.sqrt();
        for &t in &[(-half_b - root) / a, (-half_b + root) / a] {
            if t > t_range.start && t < t_range.end {
                let p = ray.point_at_parameter(t);
                let outward_normal = (p - self.center) / self.radius;
                return Some(HitRecord::with_face_normal(
                    ray,
                    t,
                    p,
                    outward_normal,
                    &self.material,
                ));
            }
        }
        None
    }
}

/// The closed set of shapes a scene can contain.
#[derive(Debug, Clone)]
pub enum Shape {
    Sphere(Sphere),
}

impl From<Sphere> for Shape {
    fn from(s: Sphere) -> Self {
        Shape::Sphere(s)
    }
}

impl Hittable for Shape {
    #[inline]
    fn hit<'o>(&'o self, ray: &Ray, t_range: Range<f32>) -> Option<HitRecord<'o>> {
        match self {
            Shape::Sphere(s) => s.hit(ray, t_range),
        }
    }
}

/// An ordered collection of shapes, tested by brute force.
///
/// Order doesn't affect which hit is reported (the nearest one always wins),
/// only how much work is wasted finding it.
#[derive(Debug, Clone, Default)]
pub struct HittableList {
    objects: Vec<Shape>,
}

impl HittableList {
    pub fn new() -> Self {
        HittableList::default()
    }

    pub fn add(&mut self, object: impl Into<Shape>) {
        self.objects.push(object.into());
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.objects.iter()
    }
}

impl<S: Into<Shape>> FromIterator<S> for HittableList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        HittableList {
            objects: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Hittable for HittableList {
    fn hit<'o>(&'o self, ray: &Ray, mut t_range: Range<f32>) -> Option<HitRecord<'o>> {
        let mut hit = None;
        for object in &self.objects {
            if let Some(rec) = object.hit(ray, t_range.clone()) {
                t_range.end = rec.t;
                hit = Some(rec);
            }
        }
        hit
    }
}
