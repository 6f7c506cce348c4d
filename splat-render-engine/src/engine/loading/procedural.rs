use std::f32::consts::PI;

use bevy::math::Vec3;
use splat_sort::{SplatCloud, SplatError};

const CLOUD_RADIUS: f32 = 1.5;
const MIN_VARIANCE: f32 = 4e-4;
const VARIANCE_JITTER: f32 = 1.6e-3;

/// A ball of `count` isotropic splats, identical on every call.
///
/// Directions follow a Fibonacci spiral and radii are spread by a hashed
/// cube root so the ball is filled uniformly. Colour follows direction.
pub fn procedural_cloud(count: usize) -> Result<SplatCloud, SplatError> {
    let golden_angle = PI * (3.0 - 5.0f32.sqrt());

    let mut positions = Vec::with_capacity(count * 3);
    let mut colors = Vec::with_capacity(count * 3);
    let mut opacities = Vec::with_capacity(count);
    let mut covariances = Vec::with_capacity(count * 6);

    for i in 0..count {
        let y = 1.0 - (2.0 * i as f32 + 1.0) / count as f32;
        let ring = (1.0 - y * y).max(0.0).sqrt();
        let angle = golden_angle * i as f32;
        let direction = Vec3::new(ring * angle.cos(), y, ring * angle.sin());

        let radius = CLOUD_RADIUS * unit_hash(i as u32).cbrt();
        let position = direction * radius;
        let color = direction * 0.5 + Vec3::splat(0.5);
        let variance = MIN_VARIANCE + VARIANCE_JITTER * unit_hash(i as u32 ^ 0x9e37_79b9);

        positions.extend_from_slice(&position.to_array());
        colors.extend_from_slice(&color.to_array());
        opacities.push(0.3 + 0.6 * unit_hash(i as u32 ^ 0x85eb_ca6b));
        covariances.extend_from_slice(&[variance, 0.0, 0.0, variance, 0.0, variance]);
    }

    SplatCloud::new(positions, colors, opacities, covariances, count)
}

/// Integer hash mapped onto `[0, 1)`.
fn unit_hash(mut x: u32) -> f32 {
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    (x >> 8) as f32 / (1u32 << 24) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_the_requested_count() {
        let cloud = procedural_cloud(1_000).unwrap();
        assert_eq!(cloud.len(), 1_000);
        assert_eq!(cloud.covariances().len(), 6_000);
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(procedural_cloud(257).unwrap(), procedural_cloud(257).unwrap());
    }

    #[test]
    fn stays_inside_the_ball() {
        let cloud = procedural_cloud(2_000).unwrap();
        let (min, max) = cloud.bounds().unwrap();
        assert!(min.cmpge(Vec3::splat(-CLOUD_RADIUS - 1e-4)).all());
        assert!(max.cmple(Vec3::splat(CLOUD_RADIUS + 1e-4)).all());
        assert!(cloud.opacities().iter().all(|&o| (0.3..=0.9).contains(&o)));
    }

    #[test]
    fn empty_cloud_is_valid() {
        assert!(procedural_cloud(0).unwrap().is_empty());
    }
}
