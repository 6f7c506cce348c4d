//! Scene loading: manifest parsing, preset selection and splat ingestion.

/// Scene manifest loading and scene switching.
///
/// Resets the camera from the chosen preset and hands a new element set to the sort worker.
pub mod manifest_loader;

/// Deterministic stand-in splat cloud used until a file ingester is attached.
pub mod procedural;

/// Loading progress tracking resource for state transitions.
pub mod progress;
