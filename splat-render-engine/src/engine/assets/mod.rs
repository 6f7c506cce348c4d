//! Scene presets loaded from JSON.

/// Scene manifest listing camera presets and optional settings overrides.
pub mod scene_manifest;
