use glam::Mat4;
use tracing::warn;

use super::sort_coordinator::SortCoordinator;
use crate::cloud::SplatCloud;
use crate::engine::SortAlgorithm;
use crate::error::WorkerError;
use crate::worker::{SortResult, SortWorkerHandle, WorkerRequest};

/// A [`SortCoordinator`] wired to a worker transport.
///
/// Call [`SortService::observe_view`] and [`SortService::dispatch`] once per
/// frame, then [`SortService::poll`] to collect a finished ordering.
#[derive(Debug)]
pub struct SortService {
    coordinator: SortCoordinator,
    worker: SortWorkerHandle,
}

impl SortService {
    pub fn new(worker: SortWorkerHandle) -> Self {
        Self {
            coordinator: SortCoordinator::new(),
            worker,
        }
    }

    /// Hand a new element set to the worker and force a re-sort.
    pub fn load(&mut self, cloud: SplatCloud) -> Result<(), WorkerError> {
        self.worker.submit(WorkerRequest::Load(cloud))?;
        self.coordinator.mark_dirty();
        Ok(())
    }

    pub fn observe_view(&mut self, view_projection: Mat4) -> bool {
        self.coordinator.observe_view(view_projection)
    }

    pub fn mark_dirty(&mut self) {
        self.coordinator.mark_dirty();
    }

    /// Send a sort request if one is due. Returns its sequence number.
    pub fn dispatch(
        &mut self,
        view_projection: Mat4,
        active_count: usize,
        algorithm: SortAlgorithm,
    ) -> Result<Option<u64>, WorkerError> {
        let Some(request) =
            self.coordinator
                .request_sort(view_projection, active_count, algorithm)
        else {
            return Ok(None);
        };

        let sequence = request.sequence;
        if let Err(err) = self.worker.submit(WorkerRequest::Sort(request)) {
            self.coordinator.abandon_in_flight();
            return Err(err);
        }
        Ok(Some(sequence))
    }

    /// Collect a finished ordering, releasing the gate when one arrives.
    pub fn poll(&mut self) -> Result<Option<SortResult>, WorkerError> {
        match self.worker.try_recv() {
            Ok(Some(result)) => {
                self.coordinator.on_sort_complete(&result);
                Ok(Some(result))
            }
            Ok(None) => Ok(None),
            Err(err) => {
                if self.coordinator.is_busy() {
                    warn!("Sort worker lost with a request in flight");
                    self.coordinator.abandon_in_flight();
                }
                Err(err)
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.coordinator.is_busy()
    }

    pub fn coordinator(&self) -> &SortCoordinator {
        &self.coordinator
    }

    /// Replace a lost worker. The new one holds no element set until the
    /// next [`SortService::load`], and any in-flight request is forgotten.
    pub fn restart(&mut self, worker: SortWorkerHandle) {
        self.worker = worker;
        self.coordinator = SortCoordinator::new();
    }
}
