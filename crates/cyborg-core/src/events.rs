//! Events emitted by the simulation for UI, audio and logging.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::NodeKind;
use crate::types::NodeId;

/// Something that happened during a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A building or enemy was spawned by its timer.
    Spawned {
        id: NodeId,
        kind: NodeKind,
        position: Vec3,
    },
    /// A bullet left the player.
    BulletFired { id: NodeId, position: Vec3 },
    /// A bullet finished its move and was removed at `position`.
    BulletExpired { id: NodeId, position: Vec3 },
    /// Two tracked bodies touched. Both are removed next frame.
    Contact { a: NodeId, b: NodeId },
    /// A contact removal actually despawned this node.
    Destroyed { id: NodeId, kind: NodeKind },
    /// A node behind the camera left the frustum and was removed.
    Culled { id: NodeId, kind: NodeKind },
    /// A tap hit this node.
    Highlighted { id: NodeId },
    /// The highlight on this node was cleared.
    HighlightCleared { id: NodeId },
}
