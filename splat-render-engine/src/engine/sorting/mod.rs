//! Depth sorting wired into the frame loop.
//!
//! Each frame the camera matrices are compared against the last sorted
//! view, a sort is dispatched to the background worker when the order has
//! gone stale and the worker is idle, and finished orderings replace the
//! splat buffers handed to the GPU upload.

use bevy::prelude::*;
use bevy::window::RequestRedraw;

use crate::engine::camera::splat_camera::update_camera_matrices;

/// Reordered attribute buffers and the events announcing them.
pub mod output;

/// User-tunable sort configuration.
pub mod settings;

/// Per-frame load forwarding, dirty observation, dispatch and polling.
pub mod systems;

use output::{LoadSplatCloud, SortedSplats, SplatsSorted};
use settings::SortSettings;
use systems::{
    DepthSortState, apply_settings_changes, dispatch_sort, forward_scene_loads,
    observe_view_changes, poll_sort_results, spawn_worker,
};

pub struct DepthSortPlugin;

impl Plugin for DepthSortPlugin {
    fn build(&self, app: &mut App) {
        let worker = spawn_worker();
        info!(
            "Depth sort worker ready ({})",
            if worker.is_threaded() { "threaded" } else { "inline" }
        );

        app.init_resource::<SortSettings>()
            .init_resource::<SortedSplats>()
            .insert_resource(DepthSortState::new(worker))
            .add_event::<LoadSplatCloud>()
            .add_event::<SplatsSorted>()
            .add_event::<RequestRedraw>()
            .add_systems(
                Update,
                (
                    forward_scene_loads,
                    apply_settings_changes,
                    observe_view_changes,
                    dispatch_sort,
                    poll_sort_results,
                )
                    .chain()
                    .after(update_camera_matrices),
            );
    }
}
