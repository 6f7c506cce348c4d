use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use constants::render_settings::FPS_NOTIFICATION_INTERVAL;

use crate::engine::core::app_state::{FpsText, SortTimeText};
use crate::engine::sorting::output::{SortedSplats, SplatsSorted};
use crate::rpc::web_rpc::WebRpcInterface;

pub fn fps_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    diagnostics: Res<DiagnosticsStore>,
    mut last_send_time: Local<f32>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();

    if current_time - *last_send_time >= FPS_NOTIFICATION_INTERVAL {
        if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
            if let Some(value) = fps.smoothed() {
                rpc_interface.send_notification(
                    "fps_update",
                    serde_json::json!({
                        "fps": value as f32
                    }),
                );
                *last_send_time = current_time;
            }
        }
    }
}

pub fn sort_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut sorted_events: EventReader<SplatsSorted>,
) {
    for sorted in sorted_events.read() {
        rpc_interface.send_notification(
            "sort_complete",
            serde_json::json!({
                "count": sorted.count,
                "sort_time": sorted.elapsed_seconds,
                "algorithm": sorted.algorithm,
            }),
        );
    }
}

pub fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    for mut text in &mut query {
        if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
            if let Some(value) = fps.smoothed() {
                text.0 = format!("FPS: {value:.1}");
            }
        }
    }
}

pub fn sort_time_text_update_system(
    sorted: Res<SortedSplats>,
    mut query: Query<&mut Text, With<SortTimeText>>,
) {
    if !sorted.is_changed() {
        return;
    }
    for mut text in &mut query {
        text.0 = format_sort_time(&sorted);
    }
}

fn format_sort_time(sorted: &SortedSplats) -> String {
    format!(
        "Sort: {:.1} ms ({} splats, {})",
        sorted.elapsed_seconds * 1000.0,
        sorted.count,
        sorted.algorithm
    )
}
