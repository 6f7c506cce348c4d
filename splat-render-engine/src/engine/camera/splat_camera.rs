use std::f32::consts::PI;

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::coordinate_system::{VIEW_PROJECTION_ROW_FLIPS, to_rasteriser_convention};
use constants::render_settings::{
    DEFAULT_FOV_DEGREES, FAR_PLANE, FREE_FLY_TICK_RATE, MIN_ORBIT_RADIUS, NEAR_PLANE,
    ORBIT_SENSITIVITY, PIXELS_PER_SCROLL_LINE, POLAR_EPSILON, ZOOM_SENSITIVITY,
};
use serde::{Deserialize, Serialize};

use crate::engine::assets::scene_manifest::ScenePreset;
use crate::engine::sorting::settings::SortSettings;

/// Orbit circles the target with mouse and wheel; free-fly moves the target
/// with WASD and keeps the eye one unit behind it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    #[default]
    Orbit,
    #[serde(alias = "freefly")]
    FreeFly,
}

/// Spherical position of the eye around the target, in the scene frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphericalCoords {
    pub theta: f32,
    pub phi: f32,
    pub radius: f32,
}

impl Default for SphericalCoords {
    fn default() -> Self {
        Self {
            theta: -PI / 2.0,
            phi: PI / 2.0,
            radius: 3.0,
        }
    }
}

/// Rotation taking `from` onto `to`. Both are normalised first.
pub fn rotate_align(from: Vec3, to: Vec3) -> Mat3 {
    Mat3::from_quat(Quat::from_rotation_arc(
        from.normalize_or(Vec3::Y),
        to.normalize_or(Vec3::Y),
    ))
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SplatCamera {
    pub target: Vec3,
    pub up: Vec3,
    pub spherical: SphericalCoords,
    pub fov_y: f32,
    pub mode: CameraMode,
    /// Maps the spherical frame's +Y onto the scene's up vector.
    pub scene_rotation: Mat3,
}

impl Default for SplatCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            up: Vec3::Y,
            spherical: SphericalCoords::default(),
            fov_y: DEFAULT_FOV_DEGREES.to_radians(),
            mode: CameraMode::Orbit,
            scene_rotation: Mat3::IDENTITY,
        }
    }
}

impl SplatCamera {
    pub fn from_preset(preset: &ScenePreset) -> Self {
        let up = preset.up.normalize_or(Vec3::Y);
        Self {
            target: preset.target,
            up,
            spherical: preset.camera,
            mode: preset.default_camera_mode,
            scene_rotation: rotate_align(Vec3::Y, up),
            ..default()
        }
    }

    pub fn is_free_fly(&self) -> bool {
        self.mode == CameraMode::FreeFly
    }

    /// Eye offset from the target at the given radius.
    pub fn offset(&self, radius: f32) -> Vec3 {
        let SphericalCoords { theta, phi, .. } = self.spherical;
        let local = Vec3::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.cos(),
            radius * phi.sin() * theta.sin(),
        );
        self.scene_rotation * local
    }

    pub fn position(&self) -> Vec3 {
        let radius = if self.is_free_fly() {
            1.0
        } else {
            self.spherical.radius
        };
        self.target + self.offset(radius)
    }

    /// Unit vector from the eye towards the target.
    pub fn front(&self) -> Vec3 {
        (-self.offset(self.spherical.radius)).normalize_or_zero()
    }

    pub fn rotate(&mut self, drag: Vec2) {
        self.spherical.theta -= drag.x * ORBIT_SENSITIVITY;
        self.spherical.phi = (self.spherical.phi + drag.y * ORBIT_SENSITIVITY)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
    }

    /// Positive `delta` moves away from the target. Ignored in free-fly.
    pub fn zoom(&mut self, delta: f32) {
        if self.is_free_fly() {
            return;
        }
        self.spherical.radius =
            (self.spherical.radius + delta * ZOOM_SENSITIVITY).max(MIN_ORBIT_RADIUS);
    }

    /// Move the target: `input.z` along front, `input.x` along right, `input.y` along up.
    pub fn fly(&mut self, input: Vec3, distance: f32) {
        let front = self.front();
        let right = front.cross(self.up).normalize_or_zero();
        let delta = front * input.z + right * input.x + self.up * input.y;
        self.target += delta * distance;
    }
}

/// View-projection for the current frame, already in the rasteriser
/// convention.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraMatrices {
    pub view_projection: Mat4,
}

impl Default for CameraMatrices {
    fn default() -> Self {
        Self {
            view_projection: Mat4::IDENTITY,
        }
    }
}

impl CameraMatrices {
    pub fn compute(camera: &SplatCamera, aspect: f32) -> Self {
        let view = Mat4::look_at_rh(camera.position(), camera.target, camera.up);
        let projection = Mat4::perspective_rh_gl(camera.fov_y, aspect, NEAR_PLANE, FAR_PLANE);
        let view_projection = projection * view;

        Self {
            view_projection: Mat4::from_cols_array(&to_rasteriser_convention(
                view_projection.to_cols_array(),
                &VIEW_PROJECTION_ROW_FLIPS,
            )),
        }
    }
}

pub fn camera_controller(
    mut camera: ResMut<SplatCamera>,
    settings: Res<SortSettings>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        camera.rotate(mouse_delta);
    }

    // Wheel up zooms in.
    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum -= match ev.unit {
            MouseScrollUnit::Line => ev.y * PIXELS_PER_SCROLL_LINE,
            MouseScrollUnit::Pixel => ev.y,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        camera.zoom(scroll_accum);
    }

    if !camera.is_free_fly() {
        return;
    }

    let mut move_input = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        move_input.z += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        move_input.z -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        move_input.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        move_input.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::Space) {
        move_input.y += 1.0;
    }
    if keyboard.pressed(KeyCode::ShiftLeft) {
        move_input.y -= 1.0;
    }

    if move_input != Vec3::ZERO {
        let distance = settings.camera_speed * FREE_FLY_TICK_RATE * time.delta_secs();
        camera.fly(move_input, distance);
    }
}

/// Recompute the frame's matrices and keep the Bevy camera on the same pose.
pub fn update_camera_matrices(
    mut camera: ResMut<SplatCamera>,
    settings: Res<SortSettings>,
    mut matrices: ResMut<CameraMatrices>,
    mut camera_query: Query<(&mut Transform, &mut Projection), With<Camera3d>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let aspect = windows
        .single()
        .ok()
        .filter(|window| window.height() > 0.0)
        .map(|window| window.width() / window.height())
        .unwrap_or(1.0);

    let fov_y = settings.fov_degrees.to_radians();
    if camera.fov_y != fov_y {
        camera.fov_y = fov_y;
    }
    *matrices = CameraMatrices::compute(&camera, aspect);

    if let Ok((mut transform, mut projection)) = camera_query.single_mut() {
        *transform =
            Transform::from_translation(camera.position()).looking_at(camera.target, camera.up);
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.fov = camera.fov_y;
            perspective.near = NEAR_PLANE;
            perspective.far = FAR_PLANE;
        }
    }
}
