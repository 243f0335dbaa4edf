//! Player and host commands sent to the simulation.
//!
//! Commands are queued and processed at the start of the next frame.

use serde::{Deserialize, Serialize};

use crate::enums::TapMode;

/// All possible inputs the host can feed the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Touch ---
    /// Tap at a viewport point (points, origin top-left).
    Tap { x: f32, y: f32 },
    /// Switch what a tap does.
    SetTapMode { mode: TapMode },

    // --- Motion ---
    /// Latest accelerometer reading (g). Replaces any previous sample.
    MotionSample { x: f32, y: f32, z: f32 },
    /// The sensor stopped; tilt is ignored until the next sample.
    StopMotionUpdates,

    // --- Simulation control ---
    /// Pause the game clock.
    Pause,
    /// Resume the game clock.
    Resume,
    /// Set the runner's time scale (1.0 = normal, 0.0 = frozen).
    SetTimeScale { scale: f64 },
}
