use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::assets::scene_manifest::SceneManifest;
use crate::engine::camera::splat_camera::{
    CameraMatrices, SplatCamera, camera_controller, update_camera_matrices,
};
use crate::engine::core::app_state::{AppState, FpsText, SortTimeText, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::manifest_loader::{
    ManifestLoader, SceneRequested, handle_scene_requests, load_manifest_system,
    start_loading,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::sorting::DepthSortPlugin;
use crate::engine::systems::fps_tracking::{fps_notification_system, sort_notification_system};
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::{fps_text_update_system, sort_time_text_update_system};
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::sort_shortcuts::algorithm_shortcut_system;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers SceneManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<SceneManifest>::new(&["json"]))
        .add_plugins(DepthSortPlugin)
        .add_plugins(WebRpcPlugin);

    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<SplatCamera>()
        .init_resource::<CameraMatrices>()
        .add_event::<SceneRequested>();

    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (load_manifest_system, transition_to_running)
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            Update,
            (
                handle_scene_requests,
                camera_controller.run_if(in_state(AppState::Running)),
                update_camera_matrices,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (fps_notification_system, sort_notification_system).run_if(in_state(AppState::Running)),
        );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(
            Update,
            (
                fps_text_update_system,
                sort_time_text_update_system,
                algorithm_shortcut_system.run_if(in_state(AppState::Running)),
            ),
        );
    }

    app
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 0.0, -3.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
            parent.spawn((
                Text::new("Sort: -"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 1., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(32.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                SortTimeText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
