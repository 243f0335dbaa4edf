//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::{Color, TaskHandle};

/// Position and euler rotation (radians, XYZ order) of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
}

/// Constant linear velocity (units/s), integrated every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub linear: Vec3,
}

/// Continuous rotation about the z axis (rad/s).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spin {
    pub rate_z: f32,
}

/// Timed relative move: the node travels `delta` from `origin` over
/// `duration` seconds of game time starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveBy {
    pub origin: Vec3,
    pub delta: Vec3,
    pub start: f64,
    pub duration: f64,
}

/// Box geometry, full extents (width, height, length).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub size: Vec3,
}

/// Surface appearance. `emission` is set while a node is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub diffuse: Color,
    pub emission: Option<Color>,
}

bitflags::bitflags! {
    /// Collision categories for contact detection.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayers: u32 {
        const BUILDING = 1 << 0;
        const ENEMY = 1 << 1;
        const BULLET = 1 << 2;
    }
}

/// Kinematic physics body. Only entities with a body take part in contacts.
/// A pair is reported when either body's `category` intersects the other's
/// `contact_mask`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Body {
    pub category: CollisionLayers,
    pub contact_mask: CollisionLayers,
}

/// Scheduled self-removal of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry {
    pub task: TaskHandle,
}

/// Pending highlight revert of a tapped node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub task: TaskHandle,
}

/// Camera projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraLens {
    /// Vertical field of view (radians).
    pub fov_y: f32,
    /// Width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// Marks the single camera node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Camera;

/// Marks the player's craft.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Marks a city building.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Building;

/// Marks a spinning enemy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;

/// Marks a player bullet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet;
