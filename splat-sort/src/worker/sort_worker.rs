use tracing::{debug, info};

use super::protocol::{SortRequest, SortResult, WorkerRequest};
use crate::clock::Stopwatch;
use crate::cloud::{COLOR_COMPONENTS, COVARIANCE_COMPONENTS, POSITION_COMPONENTS, SplatCloud};
use crate::depth::{compute_depth_keys, view_forward_row};
use crate::engine::{SortEngine, reset_indices};

/// Owns the element set and the scratch buffers of the sort cycle.
///
/// Depth keys and the index permutation are sized to the full element set
/// at load time and reused by every cycle.
#[derive(Debug, Default)]
pub struct SortWorker {
    cloud: SplatCloud,
    keys: Vec<f32>,
    indices: Vec<u32>,
    engine: SortEngine,
}

impl SortWorker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one message. Only sort requests produce a reply.
    pub fn handle(&mut self, request: WorkerRequest) -> Option<SortResult> {
        match request {
            WorkerRequest::Load(cloud) => {
                self.load(cloud);
                None
            }
            WorkerRequest::Sort(request) => Some(self.sort(&request)),
        }
    }

    pub fn load(&mut self, cloud: SplatCloud) {
        let count = cloud.len();
        self.keys = vec![0.0; count];
        self.indices = vec![0; count];
        self.engine = SortEngine::with_capacity(count);
        self.cloud = cloud;

        info!("Sort worker received {} splats", count);
    }

    pub fn total_count(&self) -> usize {
        self.cloud.len()
    }

    /// Reorder the first `min(active_count, total)` splats by depth.
    pub fn sort(&mut self, request: &SortRequest) -> SortResult {
        let stopwatch = Stopwatch::start();
        let count = request.active_count.min(self.cloud.len());

        if count == 0 {
            debug!("Sort request {} has nothing to sort", request.sequence);
            let mut result = SortResult::empty(request);
            result.elapsed_seconds = stopwatch.elapsed_seconds();
            return result;
        }

        let keys = &mut self.keys[..count];
        let indices = &mut self.indices[..count];

        let forward = view_forward_row(&request.view_projection);
        compute_depth_keys(self.cloud.positions(), forward, keys);
        reset_indices(indices);
        self.engine.sort(request.algorithm, keys, indices);

        let mut result = reorder(&self.cloud, indices);
        result.sequence = request.sequence;
        result.algorithm = request.algorithm;
        result.elapsed_seconds = stopwatch.elapsed_seconds();

        info!(
            "Sorted {} splats in {:.3}s. Algorithm: {}",
            count, result.elapsed_seconds, request.algorithm
        );

        result
    }
}

/// Gather every attribute into dense buffers following `order`.
fn reorder(cloud: &SplatCloud, order: &[u32]) -> SortResult {
    let count = order.len();
    let mut cov_a = Vec::with_capacity(count * 3);
    let mut cov_b = Vec::with_capacity(count * 3);

    for &index in order {
        let start = index as usize * COVARIANCE_COMPONENTS;
        let covariance = &cloud.covariances()[start..start + COVARIANCE_COMPONENTS];
        cov_a.extend_from_slice(&covariance[..3]);
        cov_b.extend_from_slice(&covariance[3..]);
    }

    SortResult {
        order: order.to_vec(),
        positions: gather(cloud.positions(), order, POSITION_COMPONENTS),
        colors: gather(cloud.colors(), order, COLOR_COMPONENTS),
        opacities: gather(cloud.opacities(), order, 1),
        cov_a,
        cov_b,
        ..Default::default()
    }
}

fn gather(source: &[f32], order: &[u32], components: usize) -> Vec<f32> {
    let mut out = Vec::with_capacity(order.len() * components);
    for &index in order {
        let start = index as usize * components;
        out.extend_from_slice(&source[start..start + components]);
    }
    out
}

#[cfg(test)]
mod tests {
    use glam::Mat4;

    use super::*;
    use crate::engine::SortAlgorithm;

    fn scenario_cloud() -> SplatCloud {
        let positions = vec![
            0.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, //
            0.0, 0.0, 2.0, //
            0.0, 0.0, -1.0, //
            0.0, 0.0, 0.5,
        ];
        let colors = (0..15).map(|i| i as f32).collect();
        let opacities = vec![0.0, 0.1, 0.2, 0.3, 0.4];
        let covariances = (0..30).map(|i| i as f32 * 10.0).collect();

        SplatCloud::new(positions, colors, opacities, covariances, 5).unwrap()
    }

    fn request(active_count: usize, algorithm: SortAlgorithm) -> SortRequest {
        SortRequest {
            sequence: 7,
            view_projection: Mat4::IDENTITY,
            active_count,
            algorithm,
        }
    }

    #[test]
    fn load_produces_no_reply() {
        let mut worker = SortWorker::new();
        assert!(worker.handle(WorkerRequest::Load(scenario_cloud())).is_none());
        assert_eq!(worker.total_count(), 5);
    }

    #[test]
    fn every_algorithm_orders_the_scenario() {
        let mut worker = SortWorker::new();
        worker.load(scenario_cloud());

        for algorithm in SortAlgorithm::ALL {
            let result = worker.sort(&request(5, algorithm));
            assert_eq!(result.order, vec![3, 0, 4, 1, 2], "{algorithm}");
            assert_eq!(result.algorithm, algorithm);
            assert_eq!(result.sequence, 7);
        }
    }

    #[test]
    fn attributes_follow_the_order() {
        let mut worker = SortWorker::new();
        worker.load(scenario_cloud());

        let result = worker.sort(&request(5, SortAlgorithm::QuickSort));

        assert_eq!(result.opacities, vec![0.3, 0.0, 0.4, 0.1, 0.2]);
        assert_eq!(&result.positions[..6], &[0.0, 0.0, -1.0, 0.0, 0.0, 0.0]);
        assert_eq!(&result.colors[..3], &[9.0, 10.0, 11.0]);
        assert_eq!(&result.cov_a[..3], &[180.0, 190.0, 200.0]);
        assert_eq!(&result.cov_b[..3], &[210.0, 220.0, 230.0]);
        assert_eq!(result.cov_a.len(), 15);
        assert_eq!(result.cov_b.len(), 15);
    }

    #[test]
    fn active_count_caps_the_result() {
        let mut worker = SortWorker::new();
        worker.load(scenario_cloud());

        // The cap selects the leading splats of the set; only those are ordered.
        let result = worker.sort(&request(3, SortAlgorithm::CountingSort));

        assert_eq!(result.order, vec![0, 1, 2]);
        assert_eq!(result.opacities, vec![0.0, 0.1, 0.2]);

        let mut worker = SortWorker::new();
        worker.load(
            SplatCloud::new(
                vec![0.0, 0.0, 4.0, 0.0, 0.0, -2.0, 0.0, 0.0, -9.0],
                vec![0.0; 9],
                vec![0.5, 0.6, 0.7],
                vec![0.0; 18],
                3,
            )
            .unwrap(),
        );
        let result = worker.sort(&request(2, SortAlgorithm::CountingSort));

        assert_eq!(result.order, vec![1, 0]);
        assert_eq!(result.opacities, vec![0.6, 0.5]);
        assert_eq!(result.positions, vec![0.0, 0.0, -2.0, 0.0, 0.0, 4.0]);
    }

    #[test]
    fn oversized_active_count_is_clamped() {
        let mut worker = SortWorker::new();
        worker.load(scenario_cloud());

        let result = worker.sort(&request(1_000, SortAlgorithm::Comparator));
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn empty_scene_returns_empty_buffers() {
        let mut worker = SortWorker::new();
        let result = worker.sort(&request(10, SortAlgorithm::CountingSort));

        assert!(result.is_empty());
        assert!(result.positions.is_empty());
        assert!(result.cov_b.is_empty());
    }

    #[test]
    fn zero_active_count_returns_empty_buffers() {
        let mut worker = SortWorker::new();
        worker.load(scenario_cloud());

        assert!(worker.sort(&request(0, SortAlgorithm::QuickSort)).is_empty());
    }

    #[test]
    fn reload_replaces_the_element_set() {
        let mut worker = SortWorker::new();
        worker.load(scenario_cloud());
        worker.load(
            SplatCloud::new(vec![0.0, 0.0, 3.0], vec![0.0; 3], vec![1.0], vec![0.0; 6], 1)
                .unwrap(),
        );

        let result = worker.sort(&request(5, SortAlgorithm::QuickSort));
        assert_eq!(result.order, vec![0]);
        assert_eq!(result.positions, vec![0.0, 0.0, 3.0]);
    }
}
