//! Game configuration.
//!
//! Every field has a default taken from `constants`, so a TOML file only
//! needs to name what it changes. `GameConfig::validate` rejects values the
//! simulation cannot run with.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{CullPolicy, TapMode};
use crate::types::Color;

/// Configuration errors.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete tuning of one game session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub spawn: SpawnConfig,
    pub building: BuildingConfig,
    pub enemy: EnemyConfig,
    pub camera: CameraConfig,
    pub player: PlayerConfig,
    pub bullet: BulletConfig,
    pub tap: TapConfig,
    pub cull: CullConfig,
}

/// Spawn timers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub building_interval: f64,
    pub enemy_interval: f64,
    /// Objects appear this far ahead of the camera.
    pub distance: f32,
}

/// Random building placement bounds. Each `max_*` is the exclusive upper
/// bound of the integer draw; the dimension is draw + 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingConfig {
    pub max_width: u32,
    pub max_height: u32,
    pub max_length: u32,
    pub x_range: u32,
    pub hue_steps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub x_range: u32,
    pub altitude: f32,
    pub spin_rate: f32,
    pub size: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub start_position: Vec3,
    /// Rotation about x; -π/2 looks straight down.
    pub pitch: f32,
    /// Units per second along -z.
    pub pan_speed: f32,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub altitude: f32,
    /// z offset from the camera, kept every frame.
    pub offset_z: f32,
    pub tilt_divisor: f32,
    pub x_limit: f32,
    pub roll_limit: f32,
    pub size: Vec3,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    /// Distance travelled along -z.
    pub distance: f32,
    /// Seconds to travel `distance`; the bullet is removed afterwards.
    pub duration: f64,
    pub size: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TapConfig {
    pub mode: TapMode,
    pub highlight_color: Color,
    pub highlight_duration: f64,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CullConfig {
    pub policy: CullPolicy,
    /// Live enemy count that triggers the leak warning under `BuildingsOnly`.
    pub enemy_leak_warn_threshold: usize,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            building_interval: BUILDING_SPAWN_INTERVAL,
            enemy_interval: ENEMY_SPAWN_INTERVAL,
            distance: SPAWN_DISTANCE,
        }
    }
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            max_width: BUILDING_MAX_WIDTH,
            max_height: BUILDING_MAX_HEIGHT,
            max_length: BUILDING_MAX_LENGTH,
            x_range: BUILDING_X_RANGE,
            hue_steps: BUILDING_HUE_STEPS,
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            x_range: ENEMY_X_RANGE,
            altitude: ENEMY_ALTITUDE,
            spin_rate: ENEMY_SPIN_RATE,
            size: ENEMY_SIZE,
            color: Color::WHITE,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: Vec3::new(0.0, CAMERA_HEIGHT, 0.0),
            pitch: -std::f32::consts::FRAC_PI_2,
            pan_speed: CAMERA_PAN_SPEED,
            fov_y: CAMERA_FOV_Y,
            aspect: CAMERA_ASPECT,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            altitude: PLAYER_ALTITUDE,
            offset_z: PLAYER_OFFSET_Z,
            tilt_divisor: TILT_DIVISOR,
            x_limit: PLAYER_X_LIMIT,
            roll_limit: PLAYER_ROLL_LIMIT,
            size: Vec3::from_array(PLAYER_SIZE),
            color: Color::DARK_GRAY,
        }
    }
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            distance: BULLET_DISTANCE,
            duration: BULLET_DURATION,
            size: BULLET_SIZE,
            color: Color::rgb(1.0, 1.0, 0.0),
        }
    }
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            mode: TapMode::default(),
            highlight_color: Color::RED,
            highlight_duration: HIGHLIGHT_DURATION,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
        }
    }
}

impl Default for CullConfig {
    fn default() -> Self {
        Self {
            policy: CullPolicy::default(),
            enemy_leak_warn_threshold: ENEMY_LEAK_WARN_THRESHOLD,
        }
    }
}

impl GameConfig {
    /// Load and validate a TOML configuration file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate TOML text. Missing fields take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every value the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn ensure(ok: bool, what: &str) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::Invalid(what.to_string()))
            }
        }

        ensure(
            self.spawn.building_interval > 0.0,
            "spawn.building_interval must be positive",
        )?;
        ensure(
            self.spawn.enemy_interval > 0.0,
            "spawn.enemy_interval must be positive",
        )?;
        ensure(
            self.spawn.distance.is_finite(),
            "spawn.distance must be finite",
        )?;

        let b = &self.building;
        ensure(
            b.max_width > 0 && b.max_height > 0 && b.max_length > 0,
            "building size bounds must be non-zero",
        )?;
        ensure(b.x_range > 0, "building.x_range must be non-zero")?;
        ensure(b.hue_steps > 0, "building.hue_steps must be non-zero")?;

        ensure(self.enemy.x_range > 0, "enemy.x_range must be non-zero")?;
        ensure(self.enemy.size > 0.0, "enemy.size must be positive")?;
        ensure(
            self.enemy.altitude.is_finite(),
            "enemy.altitude must be finite",
        )?;

        let c = &self.camera;
        ensure(
            c.fov_y > 0.0 && c.fov_y < std::f32::consts::PI,
            "camera.fov_y must be in (0, π)",
        )?;
        ensure(c.aspect > 0.0, "camera.aspect must be positive")?;
        ensure(
            c.pan_speed.is_finite(),
            "camera.pan_speed must be finite",
        )?;
        ensure(
            c.near > 0.0 && c.far > c.near,
            "camera clip planes must satisfy 0 < near < far",
        )?;

        let p = &self.player;
        ensure(
            p.tilt_divisor.is_normal(),
            "player.tilt_divisor must be a non-zero number",
        )?;
        ensure(
            p.x_limit >= 0.0 && p.roll_limit >= 0.0,
            "player limits must not be negative",
        )?;
        ensure(
            p.offset_z <= 0.0,
            "player.offset_z must not place the player behind the camera",
        )?;

        ensure(self.bullet.duration > 0.0, "bullet.duration must be positive")?;
        ensure(self.bullet.size > 0.0, "bullet.size must be positive")?;
        ensure(
            self.bullet.distance.is_finite(),
            "bullet.distance must be finite",
        )?;

        let t = &self.tap;
        ensure(
            t.highlight_duration >= 0.0,
            "tap.highlight_duration must not be negative",
        )?;
        ensure(
            t.viewport_width > 0.0 && t.viewport_height > 0.0,
            "tap viewport must have positive size",
        )?;

        Ok(())
    }
}
