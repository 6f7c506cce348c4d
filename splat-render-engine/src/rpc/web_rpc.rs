use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use splat_sort::SortAlgorithm;

use crate::engine::assets::scene_manifest::SceneManifest;
use crate::engine::camera::splat_camera::{CameraMode, SplatCamera};
use crate::engine::loading::manifest_loader::SceneRequested;
use crate::engine::sorting::output::SortedSplats;
use crate::engine::sorting::settings::SortSettings;
use crate::engine::sorting::systems::DepthSortState;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication with the host page.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // Ownership passes to JS so the listener outlives this system.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Everything an RPC method may read or change.
#[derive(SystemParam)]
struct ViewerControls<'w> {
    diagnostics: Res<'w, DiagnosticsStore>,
    settings: ResMut<'w, SortSettings>,
    camera: ResMut<'w, SplatCamera>,
    sorted: Res<'w, SortedSplats>,
    sort_state: Res<'w, DepthSortState>,
    manifest: Option<Res<'w, SceneManifest>>,
    scene_requests: EventWriter<'w, SceneRequested>,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut controls: ViewerControls,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                if let Some(response) = handle_rpc_request(&request, &mut controls) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Unparseable RPC message: {}", parse_error);
                rpc_interface.send_notification(
                    "debug_message",
                    serde_json::json!({
                        "message": format!("Parse error: {}", parse_error)
                    }),
                );
            }
        }
    }
}

/// Handle individual RPC request and generate response based on method.
fn handle_rpc_request(request: &RpcRequest, controls: &mut ViewerControls) -> Option<RpcResponse> {
    // Notifications carry no id. They are applied but never answered.
    let id = request.id.clone();

    let result = match request.method.as_str() {
        "set_sorting_algorithm" => {
            handle_set_sorting_algorithm(&request.params, &mut controls.settings)
        }
        "set_max_splats" => handle_set_max_splats(&request.params, &mut controls.settings),
        "set_camera_mode" => handle_set_camera_mode(&request.params, &mut controls.camera),
        "load_scene" => parse_scene_request(&request.params, controls.manifest.as_deref()).map(
            |scene| {
                let response = serde_json::json!({ "success": true, "scene": scene.name });
                controls.scene_requests.write(scene);
                response
            },
        ),
        "get_sort_stats" => Ok(sort_stats(
            &controls.settings,
            &controls.sorted,
            controls.sort_state.is_busy(),
        )),
        "get_fps" => handle_get_fps(&controls.diagnostics),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return id.map(|id| {
                create_error_response(
                    id,
                    -32601,
                    "Method not found",
                    Some(serde_json::json!({"method": request.method})),
                )
            });
        }
    };

    let id = id?;
    Some(match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    })
}

fn handle_set_sorting_algorithm(
    params: &serde_json::Value,
    settings: &mut SortSettings,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct AlgorithmParams {
        algorithm: String,
    }

    let parsed = serde_json::from_value::<AlgorithmParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'algorithm' parameter"))?;
    let algorithm = SortAlgorithm::from_name(&parsed.algorithm).ok_or_else(|| {
        RpcError::invalid_params(&format!("Unknown algorithm: {}", parsed.algorithm))
    })?;

    // Takes effect at the next dispatch; the current order stays valid.
    settings.algorithm = algorithm;
    info!("Sorting algorithm set to {}", algorithm);

    Ok(serde_json::json!({
        "success": true,
        "algorithm": algorithm
    }))
}

fn handle_set_max_splats(
    params: &serde_json::Value,
    settings: &mut SortSettings,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct MaxSplatsParams {
        max_splats: usize,
    }

    let parsed = serde_json::from_value::<MaxSplatsParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected non-negative 'max_splats' parameter"))?;

    settings.max_splats = parsed.max_splats;

    Ok(serde_json::json!({
        "success": true,
        "max_splats": parsed.max_splats
    }))
}

fn handle_set_camera_mode(
    params: &serde_json::Value,
    camera: &mut SplatCamera,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct CameraModeParams {
        free_fly: bool,
    }

    let parsed = serde_json::from_value::<CameraModeParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected boolean 'free_fly' parameter"))?;

    camera.mode = if parsed.free_fly {
        CameraMode::FreeFly
    } else {
        CameraMode::Orbit
    };

    Ok(serde_json::json!({
        "success": true,
        "mode": camera.mode
    }))
}

fn parse_scene_request(
    params: &serde_json::Value,
    manifest: Option<&SceneManifest>,
) -> Result<SceneRequested, RpcError> {
    #[derive(Deserialize)]
    struct SceneParams {
        scene: String,
    }

    let parsed = serde_json::from_value::<SceneParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'scene' parameter"))?;
    let manifest = manifest.ok_or_else(|| RpcError::internal_error("Scene manifest not loaded"))?;

    if manifest.scene(&parsed.scene).is_none() {
        return Err(RpcError {
            code: -32602,
            message: format!("Unknown scene: {}", parsed.scene),
            data: Some(serde_json::json!({ "available": manifest.scene_names() })),
        });
    }

    Ok(SceneRequested { name: parsed.scene })
}

fn sort_stats(settings: &SortSettings, sorted: &SortedSplats, busy: bool) -> serde_json::Value {
    serde_json::json!({
        "algorithm": settings.algorithm,
        "max_splats": settings.max_splats,
        "last_sort_seconds": sorted.elapsed_seconds,
        "last_sort_algorithm": sorted.algorithm,
        "sorted_count": sorted.count,
        "busy": busy
    })
}

/// Handle FPS retrieval with diagnostic system integration.
fn handle_get_fps(diagnostics: &DiagnosticsStore) -> Result<serde_json::Value, RpcError> {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32;

    Ok(serde_json::json!({
        "fps": fps
    }))
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn manifest() -> SceneManifest {
        serde_json::from_value(json!({
            "default_scene": "room",
            "scenes": [{ "name": "room" }, { "name": "building" }]
        }))
        .unwrap()
    }

    #[test]
    fn request_without_params_parses() {
        let request: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"get_sort_stats","id":3}"#).unwrap();
        assert_eq!(request.method, "get_sort_stats");
        assert!(request.params.is_null());
    }

    #[test]
    fn algorithm_accepts_both_naming_schemes() {
        let mut settings = SortSettings::default();

        handle_set_sorting_algorithm(&json!({"algorithm": "quick sort"}), &mut settings).unwrap();
        assert_eq!(settings.algorithm, SortAlgorithm::QuickSort);

        let result =
            handle_set_sorting_algorithm(&json!({"algorithm": "comparator"}), &mut settings)
                .unwrap();
        assert_eq!(settings.algorithm, SortAlgorithm::Comparator);
        assert_eq!(result["algorithm"], "comparator");
    }

    #[test]
    fn unknown_algorithm_is_invalid_params() {
        let mut settings = SortSettings::default();
        let err =
            handle_set_sorting_algorithm(&json!({"algorithm": "bogo"}), &mut settings).unwrap_err();
        assert_eq!(err.code, -32602);
        assert_eq!(settings.algorithm, SortAlgorithm::CountingSort);
    }

    #[test]
    fn max_splats_rejects_negative_values() {
        let mut settings = SortSettings::default();

        handle_set_max_splats(&json!({"max_splats": 5000}), &mut settings).unwrap();
        assert_eq!(settings.max_splats, 5000);

        assert!(handle_set_max_splats(&json!({"max_splats": -1}), &mut settings).is_err());
        assert_eq!(settings.max_splats, 5000);
    }

    #[test]
    fn camera_mode_toggles() {
        let mut camera = SplatCamera::default();

        handle_set_camera_mode(&json!({"free_fly": true}), &mut camera).unwrap();
        assert!(camera.is_free_fly());

        let result = handle_set_camera_mode(&json!({"free_fly": false}), &mut camera).unwrap();
        assert_eq!(camera.mode, CameraMode::Orbit);
        assert_eq!(result["mode"], "orbit");
    }

    #[test]
    fn scene_requests_are_checked_against_the_manifest() {
        let manifest = manifest();

        let request = parse_scene_request(&json!({"scene": "building"}), Some(&manifest)).unwrap();
        assert_eq!(request.name, "building");

        let err = parse_scene_request(&json!({"scene": "garden"}), Some(&manifest)).unwrap_err();
        assert_eq!(err.code, -32602);
        assert_eq!(err.data, Some(json!({"available": ["room", "building"]})));

        let err = parse_scene_request(&json!({"scene": "room"}), None).unwrap_err();
        assert_eq!(err.code, -32603);
    }

    #[test]
    fn stats_report_the_last_sort() {
        let sorted = SortedSplats {
            count: 42,
            elapsed_seconds: 0.25,
            algorithm: SortAlgorithm::QuickSort,
            ..Default::default()
        };
        let stats = sort_stats(&SortSettings::default(), &sorted, true);

        assert_eq!(stats["algorithm"], "counting_sort");
        assert_eq!(stats["last_sort_algorithm"], "quick_sort");
        assert_eq!(stats["sorted_count"], 42);
        assert_eq!(stats["last_sort_seconds"], 0.25);
        assert_eq!(stats["busy"], true);
    }
}
