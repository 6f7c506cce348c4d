use glam::Mat4;

use crate::cloud::SplatCloud;
use crate::engine::SortAlgorithm;

/// One request to reorder the loaded element set for a view.
///
/// Everything the worker needs is copied into the message, so later changes
/// on the producer side cannot race with a sort in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortRequest {
    /// Monotonic id assigned by the coordinator at dispatch.
    pub sequence: u64,
    pub view_projection: Mat4,
    pub active_count: usize,
    pub algorithm: SortAlgorithm,
}

/// Messages accepted by the worker.
#[derive(Debug)]
pub enum WorkerRequest {
    /// Replace the element set. Ownership moves to the worker.
    Load(SplatCloud),
    Sort(SortRequest),
}

/// Attribute buffers in ascending depth order, `len()` splats long.
///
/// The six covariance terms are split into two triples (`cov_a`, `cov_b`)
/// so each maps onto a single vertex attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortResult {
    pub sequence: u64,
    pub algorithm: SortAlgorithm,
    /// Original splat index for each output slot.
    pub order: Vec<u32>,
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub opacities: Vec<f32>,
    pub cov_a: Vec<f32>,
    pub cov_b: Vec<f32>,
    pub elapsed_seconds: f64,
}

impl SortResult {
    pub fn empty(request: &SortRequest) -> Self {
        Self {
            sequence: request.sequence,
            algorithm: request.algorithm,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
