//! ECS systems that operate on the scene world each frame.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for
//! read-only). They do not own state; timers, queues and counters are passed
//! in by the engine.

pub mod actions;
pub mod contact;
pub mod cull;
pub mod movement;
pub mod player;
pub mod snapshot;
pub mod spawner;
pub mod tap;
