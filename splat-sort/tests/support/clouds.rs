#![allow(dead_code)]

use glam::{Mat4, Vec3};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use splat_sort::SplatCloud;

/// Random splats inside a cube of half-extent `extent` centred on the origin.
///
/// Opacity encodes the original index so reordered buffers can be traced back.
pub fn random_cloud(count: usize, extent: f32, seed: u64) -> SplatCloud {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let positions: Vec<f32> = (0..count * 3)
        .map(|_| rng.gen_range(-extent..extent))
        .collect();
    let colors: Vec<f32> = (0..count * 3).map(|_| rng.gen_range(0.0..1.0)).collect();
    let opacities: Vec<f32> = (0..count).map(|i| i as f32).collect();
    let covariances: Vec<f32> = (0..count * 6).map(|_| rng.gen_range(0.0..0.1)).collect();

    SplatCloud::new(positions, colors, opacities, covariances, count).unwrap()
}

/// Splats along the z axis at the given depths.
pub fn line_cloud(depths: &[f32]) -> SplatCloud {
    let count = depths.len();
    let positions = depths.iter().flat_map(|&z| [0.0, 0.0, z]).collect();
    let opacities = (0..count).map(|i| i as f32).collect();

    SplatCloud::new(
        positions,
        vec![0.5; count * 3],
        opacities,
        vec![0.0; count * 6],
        count,
    )
    .unwrap()
}

/// A perspective view-projection looking at the origin from `eye`.
pub fn view_projection_from(eye: Vec3) -> Mat4 {
    let projection = Mat4::perspective_rh_gl(47f32.to_radians(), 1.5, 0.1, 100.0);
    let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
    projection * view
}

/// Random unit-ish forward rows, as seen in random view-projection matrices.
pub fn random_views(count: usize, seed: u64) -> Vec<Mat4> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let eye = Vec3::new(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            );
            view_projection_from(eye + Vec3::splat(0.5))
        })
        .collect()
}
