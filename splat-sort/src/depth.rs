//! Depth keys: the projection of each splat centre onto the view's forward axis.

use glam::{Mat4, Vec3};
use rayon::prelude::*;

use crate::cloud::POSITION_COMPONENTS;

/// Forward axis of a view-projection matrix: the xyz terms of its depth row.
///
/// For a column-major matrix these are elements 2, 6 and 10.
pub fn view_forward_row(view_projection: &Mat4) -> Vec3 {
    view_projection.row(2).truncate()
}

/// Smaller keys are nearer the camera.
#[inline]
pub fn depth_key(position: Vec3, forward: Vec3) -> f32 {
    position.dot(forward)
}

/// Fill `keys` with one depth key per splat, reading `keys.len()` position triples.
pub fn compute_depth_keys(positions: &[f32], forward: Vec3, keys: &mut [f32]) {
    let count = keys.len();
    debug_assert!(positions.len() >= count * POSITION_COMPONENTS);

    keys.par_iter_mut()
        .zip(positions[..count * POSITION_COMPONENTS].par_chunks_exact(POSITION_COMPONENTS))
        .for_each(|(key, position)| {
            *key = depth_key(Vec3::from_slice(position), forward);
        });
}
