/// Scene manifest, relative to the asset root.
pub const SCENE_MANIFEST_PATH: &str = "scenes.json";
