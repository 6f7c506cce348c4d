//! Shared constants for the splat viewer workspace.
//!
//! Kept dependency-free so both the sorting core and the Bevy application
//! can agree on thresholds, defaults and coordinate conventions.

/// Conversion of view and view-projection matrices into the splat rasteriser convention.
pub mod coordinate_system;

/// Asset paths.
pub mod path;

/// Camera defaults and input sensitivities.
pub mod render_settings;

/// Depth sorting thresholds and defaults.
pub mod sorting;
