//! Simulation engine for CYBORG.
//!
//! Owns the hecs ECS world, runs the per-frame systems (spawn, tilt,
//! movement, timed actions, contacts, cull) and produces `GameSnapshot`s.
//! Completely headless; a renderer only ever sees snapshots.

pub mod engine;
pub mod frustum;
pub mod random;
pub mod scheduler;
pub mod systems;
pub mod world_setup;

pub use cyborg_core as core;
pub use engine::{GameEngine, SimConfig};

#[cfg(test)]
mod tests;
