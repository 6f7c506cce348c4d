use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

#[derive(Component)]
pub struct FpsText;

#[derive(Component)]
pub struct SortTimeText;

pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.manifest_loaded && loading_progress.scene_loaded {
        info!("→ Scene ready, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}
