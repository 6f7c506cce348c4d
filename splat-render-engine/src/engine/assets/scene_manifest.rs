use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::camera::splat_camera::{CameraMode, SphericalCoords};
use crate::engine::sorting::settings::SortSettings;

/// One named scene: where the camera starts and how big the stand-in cloud is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePreset {
    pub name: String,
    #[serde(default = "default_up")]
    pub up: Vec3,
    #[serde(default)]
    pub target: Vec3,
    #[serde(default)]
    pub camera: SphericalCoords,
    #[serde(default)]
    pub default_camera_mode: CameraMode,
    /// Splats generated for the procedural stand-in cloud.
    #[serde(default = "default_splat_count")]
    pub splat_count: usize,
}

fn default_up() -> Vec3 {
    Vec3::Y
}

fn default_splat_count() -> usize {
    100_000
}

/// Scene manifest as a Bevy asset. Mirrors the JSON structure exactly.
#[derive(Asset, Debug, Clone, Serialize, Deserialize, TypePath, Resource)]
pub struct SceneManifest {
    pub default_scene: String,
    pub scenes: Vec<ScenePreset>,
    /// Overrides for the viewer defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SortSettings>,
}

impl SceneManifest {
    pub fn scene(&self, name: &str) -> Option<&ScenePreset> {
        self.scenes.iter().find(|scene| scene.name == name)
    }

    /// The configured default, falling back to the first listed scene.
    pub fn default_preset(&self) -> Option<&ScenePreset> {
        self.scene(&self.default_scene).or_else(|| self.scenes.first())
    }

    pub fn scene_names(&self) -> Vec<&str> {
        self.scenes.iter().map(|scene| scene.name.as_str()).collect()
    }
}
