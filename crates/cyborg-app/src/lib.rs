//! CYBORG headless application.
//!
//! Wires the simulation engine to a fixed-rate game-loop thread, a scripted
//! tilt source and a command-line runner that streams JSON snapshots.

pub mod cli;
pub mod error;
pub mod game_loop;
pub mod motion;
pub mod runner;
pub mod state;

pub use cyborg_core as core;
pub use error::AppError;
