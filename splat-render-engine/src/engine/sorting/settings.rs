use bevy::prelude::*;
use constants::render_settings::{DEFAULT_CAMERA_SPEED, DEFAULT_FOV_DEGREES};
use constants::sorting::DEFAULT_MAX_SPLATS;
use serde::{Deserialize, Serialize};
use splat_sort::SortAlgorithm;

/// Runtime configuration of the viewer. Missing fields take their defaults,
/// so a scene manifest may override any subset.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSettings {
    pub algorithm: SortAlgorithm,
    /// Cap on the number of splats sorted and drawn.
    pub max_splats: usize,
    /// Free-fly distance per tick.
    pub camera_speed: f32,
    pub fov_degrees: f32,
}

impl Default for SortSettings {
    fn default() -> Self {
        Self {
            algorithm: SortAlgorithm::CountingSort,
            max_splats: DEFAULT_MAX_SPLATS,
            camera_speed: DEFAULT_CAMERA_SPEED,
            fov_degrees: DEFAULT_FOV_DEGREES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let settings: SortSettings =
            serde_json::from_str(r#"{ "algorithm": "quick sort", "max_splats": 2000 }"#).unwrap();

        assert_eq!(settings.algorithm, SortAlgorithm::QuickSort);
        assert_eq!(settings.max_splats, 2000);
        assert_eq!(settings.camera_speed, DEFAULT_CAMERA_SPEED);
        assert_eq!(settings.fov_degrees, DEFAULT_FOV_DEGREES);
    }

    #[test]
    fn defaults_use_counting_sort() {
        let settings = SortSettings::default();
        assert_eq!(settings.algorithm, SortAlgorithm::CountingSort);
        assert_eq!(settings.max_splats, 1_000_000);
    }
}
