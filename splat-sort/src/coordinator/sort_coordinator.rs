use glam::Mat4;
use tracing::debug;

use super::gate::SingleFlight;
use super::view_tracker::ViewChangeTracker;
use crate::engine::SortAlgorithm;
use crate::worker::{SortRequest, SortResult};

/// Decides when a new ordering is needed and keeps at most one in flight.
///
/// The dirty flag and the single-flight gate are independent: a view change
/// observed while busy leaves the flag set, and the next frame after the
/// result lands dispatches once with whatever matrix is current then.
#[derive(Debug, Default, Clone)]
pub struct SortCoordinator {
    views: ViewChangeTracker,
    gate: SingleFlight,
    next_sequence: u64,
    last_completed: Option<u64>,
}

impl SortCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `view_projection` against the baseline. Returns the dirty flag.
    pub fn observe_view(&mut self, view_projection: Mat4) -> bool {
        self.views.observe(view_projection)
    }

    pub fn mark_dirty(&mut self) {
        self.views.mark_dirty();
    }

    pub fn is_dirty(&self) -> bool {
        self.views.is_dirty()
    }

    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    pub fn last_completed(&self) -> Option<u64> {
        self.last_completed
    }

    /// Build a request if the order is stale and the worker is idle.
    ///
    /// Claiming the gate clears the dirty flag; anything that dirties the
    /// order after this point is picked up by a later request.
    pub fn request_sort(
        &mut self,
        view_projection: Mat4,
        active_count: usize,
        algorithm: SortAlgorithm,
    ) -> Option<SortRequest> {
        if !self.views.is_dirty() || !self.gate.try_acquire() {
            return None;
        }

        self.views.clear();
        self.next_sequence += 1;

        debug!("Dispatching sort request {}", self.next_sequence);

        Some(SortRequest {
            sequence: self.next_sequence,
            view_projection,
            active_count,
            algorithm,
        })
    }

    pub fn on_sort_complete(&mut self, result: &SortResult) {
        self.last_completed = Some(result.sequence);
        self.gate.release();
    }

    /// The outstanding request will never be answered. Free the gate and
    /// make sure the order is recomputed once a worker is back.
    pub fn abandon_in_flight(&mut self) {
        self.gate.release();
        self.views.mark_dirty();
    }
}
