//! Game state snapshot: the complete visible state handed to a renderer each frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{GamePhase, NodeKind, TapMode};
use crate::events::GameEvent;
use crate::types::{Color, FrameTime, NodeId};

/// Complete scene state after one frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub time: FrameTime,
    pub phase: GamePhase,
    pub tap_mode: TapMode,
    pub camera: CameraView,
    pub player: Option<PlayerView>,
    /// Every node except the camera, ordered by id.
    pub nodes: Vec<NodeView>,
    pub events: Vec<GameEvent>,
    pub stats: SceneStats,
}

/// Camera pose.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CameraView {
    pub position: Vec3,
    pub rotation: Vec3,
}

/// Player pose.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: NodeId,
    pub position: Vec3,
    /// Rotation about z (radians), driven by tilt.
    pub roll: f32,
}

/// One drawable node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeView {
    pub id: NodeId,
    pub kind: NodeKind,
    pub position: Vec3,
    pub rotation: Vec3,
    pub size: Vec3,
    pub color: Color,
    pub highlighted: bool,
}

/// Running counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneStats {
    pub buildings: u32,
    pub enemies: u32,
    pub bullets: u32,
    pub spawned_total: u64,
    pub culled_total: u64,
    pub destroyed_total: u64,
    pub bullets_fired: u64,
    pub pending_tasks: u32,
}
