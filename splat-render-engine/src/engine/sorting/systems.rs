use bevy::prelude::*;
use bevy::window::RequestRedraw;
use splat_sort::{
    SortAlgorithm, SortResult, SortService, SortWorkerHandle, SplatCloud, WorkerError,
};

use super::output::{LoadSplatCloud, SortedSplats, SplatsSorted};
use super::settings::SortSettings;
use crate::engine::camera::splat_camera::CameraMatrices;

/// Producer side of the depth sort: the coordinator and its worker.
///
/// A lost worker is reported once. Dispatch and polling then stay idle and
/// the last ordering keeps being drawn until the next scene load brings up
/// a fresh worker.
#[derive(Resource, Debug)]
pub struct DepthSortState {
    service: SortService,
    applied_max_splats: Option<usize>,
    worker_lost: bool,
}

impl DepthSortState {
    pub fn new(worker: SortWorkerHandle) -> Self {
        Self {
            service: SortService::new(worker),
            applied_max_splats: None,
            worker_lost: false,
        }
    }

    pub fn service(&self) -> &SortService {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut SortService {
        &mut self.service
    }

    pub fn is_busy(&self) -> bool {
        self.service.is_busy()
    }

    /// Hand a new element set to the worker, replacing the worker first if
    /// the previous one was lost.
    pub fn load(&mut self, cloud: SplatCloud) -> Result<(), WorkerError> {
        if self.worker_lost {
            warn!("Restarting the sort worker");
            self.service.restart(spawn_worker());
            self.worker_lost = false;
        }
        self.service.load(cloud).inspect_err(|_| self.worker_lost = true)
    }

    /// Send a sort request if one is due. Returns its sequence number.
    pub fn dispatch(
        &mut self,
        view_projection: Mat4,
        max_splats: usize,
        algorithm: SortAlgorithm,
    ) -> Option<u64> {
        if self.worker_lost {
            return None;
        }
        match self.service.dispatch(view_projection, max_splats, algorithm) {
            Ok(sequence) => sequence,
            Err(err) => {
                self.worker_failed(err);
                None
            }
        }
    }

    pub fn poll(&mut self) -> Option<SortResult> {
        if self.worker_lost {
            return None;
        }
        match self.service.poll() {
            Ok(result) => result,
            Err(err) => {
                self.worker_failed(err);
                None
            }
        }
    }

    fn worker_failed(&mut self, err: WorkerError) {
        error!("Sort worker lost, keeping the last ordering: {err}");
        self.worker_lost = true;
    }

    /// Record the active cap. A change forces a re-sort even without a view
    /// change. Returns whether it did.
    pub fn apply_max_splats(&mut self, max_splats: usize) -> bool {
        let previous = self.applied_max_splats.replace(max_splats);
        if previous.is_some_and(|previous| previous != max_splats) {
            self.service.mark_dirty();
            return true;
        }
        false
    }
}

pub fn forward_scene_loads(
    mut loads: ResMut<Events<LoadSplatCloud>>,
    mut state: ResMut<DepthSortState>,
) {
    for LoadSplatCloud(cloud) in loads.drain() {
        let count = cloud.len();
        match state.load(cloud) {
            Ok(()) => info!("Sent {} splats to the sort worker", count),
            Err(err) => error!("Failed to load splats: {err}"),
        }
    }
}

pub fn apply_settings_changes(settings: Res<SortSettings>, mut state: ResMut<DepthSortState>) {
    if !settings.is_changed() {
        return;
    }
    if state.apply_max_splats(settings.max_splats) {
        info!("Splat cap changed to {}, re-sorting", settings.max_splats);
    }
}

pub fn observe_view_changes(matrices: Res<CameraMatrices>, mut state: ResMut<DepthSortState>) {
    state.service.observe_view(matrices.view_projection);
}

pub fn dispatch_sort(
    matrices: Res<CameraMatrices>,
    settings: Res<SortSettings>,
    mut state: ResMut<DepthSortState>,
) {
    if let Some(sequence) =
        state.dispatch(matrices.view_projection, settings.max_splats, settings.algorithm)
    {
        debug!("Sort {} dispatched ({})", sequence, settings.algorithm);
    }
}

pub fn poll_sort_results(
    mut state: ResMut<DepthSortState>,
    mut sorted: ResMut<SortedSplats>,
    mut sorted_events: EventWriter<SplatsSorted>,
    mut redraw: EventWriter<RequestRedraw>,
) {
    if let Some(result) = state.poll() {
        sorted_events.write(sorted.replace(result));
        redraw.write(RequestRedraw);
    }
}

/// Start a worker thread, or sort on the main thread where that fails.
pub fn spawn_worker() -> SortWorkerHandle {
    SortWorkerHandle::spawn().unwrap_or_else(|err| {
        warn!("{err}; sorting on the main thread instead");
        SortWorkerHandle::inline()
    })
}
