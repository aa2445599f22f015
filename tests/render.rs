use rand::prelude::*;
use rand::rngs::SmallRng;

use pathtracer::scene;
use pathtracer::vec3::Vec3;
use pathtracer::*;

const NX: usize = 16;
const NY: usize = 9;

fn settings() -> RenderSettings {
    RenderSettings {
        width: NX,
        height: NY,
        samples_per_pixel: 8,
        max_depth: 10,
    }
}

fn camera() -> Camera {
    Camera::look(
        Vec3(0., 0., 0.),
        Vec3(0., 0., -1.),
        Vec3(0., 1., 0.),
        90.,
        NX as f32 / NY as f32,
        0.,
        1.,
    )
}

#[test]
fn seeded_render_is_repeatable() {
    let world = scene::two_spheres();

    let first = cast(&settings(), &camera(), &world, &mut SmallRng::seed_from_u64(0xDEADBEEF))
        .unwrap()
        .to_rgb8();
    let second = cast(&settings(), &camera(), &world, &mut SmallRng::seed_from_u64(0xDEADBEEF))
        .unwrap()
        .to_rgb8();

    assert_eq!(first.len(), NX * NY * 3);
    assert_eq!(first, second);
}

#[test]
fn parallel_render_is_repeatable() {
    let world = scene::two_spheres();
    let first = par_cast(&settings(), &camera(), &world, 7).unwrap();
    let second = par_cast(&settings(), &camera(), &world, 7).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_rgb8().len(), NX * NY * 3);
}

#[test]
fn two_spheres_layout() {
    let world = scene::two_spheres();
    let image = par_cast(&settings(), &camera(), &world, 11).unwrap();
    let bytes = image.to_rgb8();
    let px = |x: usize, y: usize| {
        let i = (y * NX + x) * 3;
        [bytes[i], bytes[i + 1], bytes[i + 2]]
    };

    // The top corners see open sky: blue is saturated and red is not.
    for &x in &[0, NX - 1] {
        let [r, _, b] = px(x, 0);
        assert_eq!(b, 255);
        assert!(r < 255);
    }

    // The middle of the image is the reddish sphere, which is darker than the
    // sky and redder than it is blue.
    let [r, _, b] = px(NX / 2, NY / 2);
    assert!(b < 200, "center pixel blue {}", b);
    assert!(r > b, "center pixel {:?}", px(NX / 2, NY / 2));
}

#[test]
fn showcase_renders_every_material() {
    // Glass, metal and diffuse surfaces all in one frame, including the
    // hollow (negative radius) glass shell.
    let world = scene::showcase();
    let camera = Camera::look(
        Vec3(-2., 2., 1.),
        Vec3(0., 0., -1.),
        Vec3(0., 1., 0.),
        20.,
        NX as f32 / NY as f32,
        0.,
        1.,
    );
    let image = par_cast(&settings(), &camera, &world, 1).unwrap();
    assert_eq!(image.width(), NX);
    assert_eq!(image.height(), NY);
    for y in 0..NY {
        for x in 0..NX {
            let sum = image.pixel_sum(x, y);
            assert!(sum.0.is_finite() && sum.1.is_finite() && sum.2.is_finite());
            assert!(sum.0 >= 0. && sum.1 >= 0. && sum.2 >= 0.);
        }
    }
}
