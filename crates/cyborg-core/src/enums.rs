//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// What a scene node is. Every spawned entity carries exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Camera,
    Player,
    Building,
    Enemy,
    Bullet,
}

/// Overall game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Running,
    Paused,
}

/// What a tap on the view does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TapMode {
    /// Hit-test the scene and flash the tapped node.
    Highlight,
    /// Fire a bullet from the player.
    #[default]
    Fire,
}

impl std::str::FromStr for TapMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "highlight" => Ok(TapMode::Highlight),
            "fire" => Ok(TapMode::Fire),
            other => Err(format!("unknown tap mode: {other}")),
        }
    }
}

/// Which nodes the frustum cull may remove.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CullPolicy {
    /// Every node except the camera.
    #[default]
    AllNodes,
    /// Buildings only; enemies are left to contact removal and accumulate
    /// if never hit.
    BuildingsOnly,
}
