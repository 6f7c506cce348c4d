use bevy::prelude::*;
use constants::path::SCENE_MANIFEST_PATH;

use super::procedural::procedural_cloud;
use super::progress::LoadingProgress;
use crate::engine::assets::scene_manifest::SceneManifest;
use crate::engine::camera::splat_camera::SplatCamera;
use crate::engine::sorting::output::LoadSplatCloud;
use crate::engine::sorting::settings::SortSettings;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<SceneManifest>>,
}

/// Asks for a scene from the manifest by name.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SceneRequested {
    pub name: String,
}

pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    info!("Loading scene manifest from: {}", SCENE_MANIFEST_PATH);
    manifest_loader.handle = Some(asset_server.load(SCENE_MANIFEST_PATH));
}

/// Install the manifest once parsed, apply its settings and request the default scene.
pub fn load_manifest_system(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    manifests: Res<Assets<SceneManifest>>,
    mut settings: ResMut<SortSettings>,
    mut scene_requests: EventWriter<SceneRequested>,
    mut commands: Commands,
) {
    if loading_progress.manifest_loaded {
        return;
    }

    let Some(manifest) = manifest_loader
        .handle
        .as_ref()
        .and_then(|handle| manifests.get(handle))
    else {
        return;
    };

    info!("✓ Scene manifest loaded: {:?}", manifest.scene_names());
    if let Some(overrides) = &manifest.settings {
        *settings = overrides.clone();
    }

    match manifest.default_preset() {
        Some(preset) => {
            scene_requests.write(SceneRequested {
                name: preset.name.clone(),
            });
        }
        None => warn!("Scene manifest lists no scenes"),
    }

    commands.insert_resource(manifest.clone());
    loading_progress.manifest_loaded = true;
}

/// Reset the camera from the preset and replace the element set wholesale.
pub fn handle_scene_requests(
    mut requests: EventReader<SceneRequested>,
    manifest: Option<Res<SceneManifest>>,
    mut camera: ResMut<SplatCamera>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut loads: EventWriter<LoadSplatCloud>,
) {
    let Some(manifest) = manifest else {
        return;
    };

    for request in requests.read() {
        let Some(preset) = manifest.scene(&request.name) else {
            warn!("Unknown scene requested: {}", request.name);
            continue;
        };

        let cloud = match procedural_cloud(preset.splat_count) {
            Ok(cloud) => cloud,
            Err(err) => {
                error!("Failed to build scene {}: {err}", preset.name);
                continue;
            }
        };

        info!("✓ Scene {} ready with {} splats", preset.name, cloud.len());
        *camera = SplatCamera::from_preset(preset);
        loads.write(LoadSplatCloud(cloud));
        loading_progress.scene_loaded = true;
    }
}
