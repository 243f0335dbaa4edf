//! Drives a session: feeds tilt and taps to the engine and streams
//! snapshots as JSON lines.
//!
//! Offline sessions step the engine directly with a fixed frame time and are
//! fully deterministic. Realtime sessions go through the game loop thread
//! and its command channel.

use std::io::Write;
use std::sync::mpsc;

use log::info;

use cyborg_core::commands::PlayerCommand;
use cyborg_core::constants::FRAME_DT;
use cyborg_core::state::{GameSnapshot, SceneStats};
use cyborg_sim::engine::{GameEngine, SimConfig};

use crate::error::AppError;
use crate::motion::MotionSource;
use crate::state::AppState;

/// How a session is run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub sim: SimConfig,
    /// Number of frames to run.
    pub frames: u64,
    /// Write every n-th snapshot; 0 writes only the last one.
    pub snapshot_every: u64,
    /// Tap the screen center every n-th frame; 0 never taps.
    pub tap_every: u64,
    /// Run on the game loop thread at wall-clock pace.
    pub realtime: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            frames: 600,
            snapshot_every: 60,
            tap_every: 30,
            realtime: false,
        }
    }
}

/// What a finished session reports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub snapshots_written: u64,
    pub game_secs: f64,
    pub stats: SceneStats,
}

/// Builds the host input for each frame.
struct InputScript<'a> {
    motion: &'a mut dyn MotionSource,
    tap_every: u64,
    tap_point: (f32, f32),
    motion_active: bool,
}

impl<'a> InputScript<'a> {
    fn new(options: &RunOptions, motion: &'a mut dyn MotionSource) -> Self {
        let tap = &options.sim.game.tap;
        Self {
            motion,
            tap_every: options.tap_every,
            tap_point: (tap.viewport_width / 2.0, tap.viewport_height / 2.0),
            motion_active: false,
        }
    }

    fn commands(&mut self, frame: u64, t: f64) -> Vec<PlayerCommand> {
        let mut commands = Vec::new();
        match self.motion.sample(t) {
            Some(a) => {
                self.motion_active = true;
                commands.push(PlayerCommand::MotionSample {
                    x: a.x,
                    y: a.y,
                    z: a.z,
                });
            }
            None if self.motion_active => {
                self.motion_active = false;
                commands.push(PlayerCommand::StopMotionUpdates);
            }
            None => {}
        }
        if self.tap_every > 0 && frame > 0 && frame % self.tap_every == 0 {
            let (x, y) = self.tap_point;
            commands.push(PlayerCommand::Tap { x, y });
        }
        commands
    }
}

fn should_write(options: &RunOptions, frame: u64) -> bool {
    let last = frame + 1 == options.frames;
    last || (options.snapshot_every > 0 && frame % options.snapshot_every == 0)
}

fn write_snapshot(out: &mut dyn Write, snapshot: &GameSnapshot) -> Result<(), AppError> {
    serde_json::to_writer(&mut *out, snapshot)?;
    writeln!(out)?;
    Ok(())
}

/// Run a session, offline or realtime per `options`.
pub fn run(
    options: &RunOptions,
    motion: &mut dyn MotionSource,
    out: &mut dyn Write,
) -> Result<RunSummary, AppError> {
    info!(
        "running {} frames (seed {}, tap mode {:?}, {})",
        options.frames,
        options.sim.seed,
        options.sim.game.tap.mode,
        if options.realtime { "realtime" } else { "offline" }
    );
    let summary = if options.realtime {
        run_realtime(options, motion, out)?
    } else {
        run_offline(options, motion, out)?
    };
    info!(
        "done: {:.2}s game time, {} spawned, {} culled, {} destroyed, {} bullets",
        summary.game_secs,
        summary.stats.spawned_total,
        summary.stats.culled_total,
        summary.stats.destroyed_total,
        summary.stats.bullets_fired
    );
    Ok(summary)
}

/// Step the engine directly at a fixed 60Hz frame time.
pub fn run_offline(
    options: &RunOptions,
    motion: &mut dyn MotionSource,
    out: &mut dyn Write,
) -> Result<RunSummary, AppError> {
    let mut engine = GameEngine::new(options.sim.clone());
    let mut input = InputScript::new(options, motion);
    let mut summary = RunSummary::default();

    for frame in 0..options.frames {
        let t = frame as f64 * FRAME_DT;
        engine.queue_commands(input.commands(frame, t));
        let snapshot = engine.frame(t);

        if should_write(options, frame) {
            write_snapshot(out, &snapshot)?;
            summary.snapshots_written += 1;
        }
        summary.frames += 1;
        summary.game_secs = snapshot.time.game_secs;
        summary.stats = snapshot.stats;
    }
    Ok(summary)
}

/// Run on the game loop thread, sending input through the command channel.
pub fn run_realtime(
    options: &RunOptions,
    motion: &mut dyn MotionSource,
    out: &mut dyn Write,
) -> Result<RunSummary, AppError> {
    let state = AppState::new();
    let (snap_tx, snap_rx) = mpsc::channel();
    state.start(options.sim.clone(), Some(snap_tx))?;

    let mut input = InputScript::new(options, motion);
    let mut summary = RunSummary::default();

    for frame in 0..options.frames {
        for command in input.commands(frame, frame as f64 * FRAME_DT) {
            state.send_command(command)?;
        }
        let snapshot = snap_rx.recv().map_err(|_| AppError::NotRunning)?;

        if should_write(options, frame) {
            write_snapshot(out, &snapshot)?;
            summary.snapshots_written += 1;
        }
        summary.frames += 1;
        summary.game_secs = snapshot.time.game_secs;
        summary.stats = snapshot.stats;
    }

    state.shutdown()?;
    Ok(summary)
}
