//! Control surface for a host page embedding the viewer in an iframe.
//!
//! Messages are JSON-RPC 2.0 objects carried over `postMessage`. A request
//! with an `id` gets a response; one without an `id` is applied silently.
//! Malformed messages are not answered and surface as a `debug_message`
//! notification instead.
//!
//! ## Methods
//!
//! | Method | Params | Result |
//! |---|---|---|
//! | `set_sorting_algorithm` | `{ algorithm }` | algorithm used from the next dispatch |
//! | `set_max_splats` | `{ max_splats }` | new cap, forces a re-sort |
//! | `set_camera_mode` | `{ free_fly }` | resulting mode |
//! | `load_scene` | `{ scene }` | scene name; unknown names list the available ones |
//! | `get_sort_stats` | none | algorithm, cap, last sort, sorted count, busy flag |
//! | `get_fps` | none | smoothed frame rate |
//!
//! Failures use `-32601` for unknown methods, `-32602` for bad params or an
//! unknown scene and `-32603` when no scene manifest is loaded yet.
//!
//! ## Notifications
//!
//! `sort_complete` follows every finished ordering with its count, time and
//! algorithm. `fps_update` is sent twice a second while running.

/// Message pump, request dispatch and handlers.
pub mod web_rpc;
