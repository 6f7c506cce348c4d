//! Runtime systems for diagnostics and native shortcuts.

/// FPS and sort-time tracking for the frontend and the native overlay.
///
/// Sends frame rate and sort completion notifications via RPC and updates native UI overlays.
pub mod fps_tracking;

/// Keyboard shortcuts selecting the sorting algorithm on native builds.
pub mod sort_shortcuts;
