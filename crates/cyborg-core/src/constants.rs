//! Simulation constants and default tuning parameters.
//!
//! Every value here is the default of a `GameConfig` field unless noted.

/// Game-loop rate of the headless runner (Hz).
pub const FRAME_RATE: u32 = 60;

/// Seconds per frame at the default rate.
pub const FRAME_DT: f64 = 1.0 / FRAME_RATE as f64;

// --- Spawning ---

/// Seconds between building spawns.
pub const BUILDING_SPAWN_INTERVAL: f64 = 0.5;

/// Seconds between enemy spawns.
pub const ENEMY_SPAWN_INTERVAL: f64 = 1.0;

/// Distance ahead of the camera (along -z) at which new objects appear.
pub const SPAWN_DISTANCE: f32 = 20.0;

// --- Buildings ---

/// Exclusive upper bound of the random width draw (width = draw + 1).
pub const BUILDING_MAX_WIDTH: u32 = 4;

/// Exclusive upper bound of the random height draw (height = draw + 1).
pub const BUILDING_MAX_HEIGHT: u32 = 12;

/// Exclusive upper bound of the random length draw (length = draw + 1).
pub const BUILDING_MAX_LENGTH: u32 = 4;

/// Width of the street band buildings are scattered over, centered on x = 0.
pub const BUILDING_X_RANGE: u32 = 12;

/// Number of discrete hues a building color is drawn from (out of this many).
pub const BUILDING_HUE_STEPS: u32 = 355;

// --- Enemies ---

/// Width of the band enemies are scattered over, centered on x = 0.
pub const ENEMY_X_RANGE: u32 = 6;

/// Enemy flight altitude.
pub const ENEMY_ALTITUDE: f32 = 15.0;

/// Enemy spin about z (rad/s): one full turn per second.
pub const ENEMY_SPIN_RATE: f32 = std::f32::consts::TAU;

/// Enemy cube edge length.
pub const ENEMY_SIZE: f32 = 1.0;

// --- Camera ---

/// Camera start height above the street.
pub const CAMERA_HEIGHT: f32 = 25.0;

/// Camera pan speed along -z (units/s).
pub const CAMERA_PAN_SPEED: f32 = 2.0;

/// Vertical field of view (radians), 60 degrees.
pub const CAMERA_FOV_Y: f32 = std::f32::consts::FRAC_PI_3;

/// Portrait phone aspect ratio (width / height).
pub const CAMERA_ASPECT: f32 = 375.0 / 667.0;

pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 100.0;

// --- Player ---

/// Player flight altitude (same plane as the enemies, so bullets can hit them).
pub const PLAYER_ALTITUDE: f32 = 15.0;

/// Player z offset from the camera (negative = ahead of the camera).
pub const PLAYER_OFFSET_Z: f32 = -3.0;

/// Acceleration divisor applied each frame.
pub const TILT_DIVISOR: f32 = 5.0;

/// Player x is clamped to [-PLAYER_X_LIMIT, PLAYER_X_LIMIT].
pub const PLAYER_X_LIMIT: f32 = 3.0;

/// Player z-rotation is clamped to [-PLAYER_ROLL_LIMIT, PLAYER_ROLL_LIMIT].
pub const PLAYER_ROLL_LIMIT: f32 = 0.5;

/// Player hull extents (w, h, l).
pub const PLAYER_SIZE: [f32; 3] = [1.0, 0.5, 1.5];

// --- Bullets ---

/// Distance a bullet travels along -z before it is removed.
pub const BULLET_DISTANCE: f32 = 20.0;

/// Seconds a bullet takes to cover `BULLET_DISTANCE`.
pub const BULLET_DURATION: f64 = 1.0;

/// Bullet cube edge length.
pub const BULLET_SIZE: f32 = 0.25;

// --- Tap ---

/// Seconds a tapped node stays highlighted.
pub const HIGHLIGHT_DURATION: f64 = 0.5;

/// Default viewport size in points (portrait phone).
pub const VIEWPORT_WIDTH: f32 = 375.0;
pub const VIEWPORT_HEIGHT: f32 = 667.0;

// --- Cull ---

/// Live enemy count above which the leak warning fires under
/// `CullPolicy::BuildingsOnly`.
pub const ENEMY_LEAK_WARN_THRESHOLD: usize = 64;

// --- Runner ---

/// Maximum time scale accepted by `SetTimeScale`.
pub const MAX_TIME_SCALE: f64 = 4.0;
