use bevy::prelude::*;

#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    pub manifest_loaded: bool,
    pub scene_loaded: bool,
}
