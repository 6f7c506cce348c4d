use bevy::prelude::*;
use splat_sort::{SortAlgorithm, SortResult, SplatCloud};

/// Hands a freshly ingested element set to the sort worker.
#[derive(Event, Debug)]
pub struct LoadSplatCloud(pub SplatCloud);

/// Emitted once per completed sort, after [`SortedSplats`] is updated.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SplatsSorted {
    pub count: usize,
    pub elapsed_seconds: f64,
    pub algorithm: SortAlgorithm,
}

/// The latest depth-ordered attribute buffers, nearest splat first.
///
/// Replaced wholesale by each completed sort; between sorts the previous
/// ordering stays valid for drawing.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct SortedSplats {
    pub sequence: u64,
    pub algorithm: SortAlgorithm,
    pub count: usize,
    pub elapsed_seconds: f64,
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub opacities: Vec<f32>,
    pub cov_a: Vec<f32>,
    pub cov_b: Vec<f32>,
}

impl SortedSplats {
    pub fn replace(&mut self, result: SortResult) -> SplatsSorted {
        *self = Self {
            sequence: result.sequence,
            algorithm: result.algorithm,
            count: result.len(),
            elapsed_seconds: result.elapsed_seconds,
            positions: result.positions,
            colors: result.colors,
            opacities: result.opacities,
            cov_a: result.cov_a,
            cov_b: result.cov_b,
        };

        SplatsSorted {
            count: self.count,
            elapsed_seconds: self.elapsed_seconds,
            algorithm: self.algorithm,
        }
    }

    /// Each attribute buffer as raw bytes, keyed by its vertex attribute name.
    pub fn attribute_bytes(&self) -> [(&'static str, &[u8]); 5] {
        [
            ("a_center", bytemuck::cast_slice(&self.positions)),
            ("a_col", bytemuck::cast_slice(&self.colors)),
            ("a_opacity", bytemuck::cast_slice(&self.opacities)),
            ("a_covA", bytemuck::cast_slice(&self.cov_a)),
            ("a_covB", bytemuck::cast_slice(&self.cov_b)),
        ]
    }
}
