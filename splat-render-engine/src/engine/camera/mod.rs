//! Splat camera for scene navigation.
//!
//! Provides orbit and free-fly controls around a scene target, and produces
//! the view and view-projection matrices the depth sort consumes.

/// Splat camera resource, matrix computation and controller systems.
pub mod splat_camera;
