/// Vertical field of view in degrees used when no scene overrides it.
pub const DEFAULT_FOV_DEGREES: f32 = 47.0;

/// Free-fly translation per input tick.
pub const DEFAULT_CAMERA_SPEED: f32 = 0.07;

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

/// Radians of orbit per pixel of mouse drag.
pub const ORBIT_SENSITIVITY: f32 = 0.005;

/// Orbit radius change per wheel unit.
pub const ZOOM_SENSITIVITY: f32 = 0.01;

pub const MIN_ORBIT_RADIUS: f32 = 1.0;

/// Keeps `phi` away from the poles so the look-at basis stays defined.
pub const POLAR_EPSILON: f32 = 1e-6;

/// Interval between FPS notifications sent to the frontend, in seconds.
pub const FPS_NOTIFICATION_INTERVAL: f32 = 0.5;

/// Wheel travel, in pixels, of one line-based scroll step.
pub const PIXELS_PER_SCROLL_LINE: f32 = 100.0;

/// Free-fly speed is expressed per tick at this rate.
pub const FREE_FLY_TICK_RATE: f32 = 60.0;
