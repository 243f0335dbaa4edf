//! Game loop thread: runs the engine at 60Hz and publishes snapshots.
//!
//! The engine is created inside this thread so it never crosses threads.
//! Commands arrive via an `mpsc` channel. Snapshots are stored in shared
//! state for polling and, when a listener is attached, forwarded to it.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, info};

use cyborg_core::constants::{FRAME_DT, FRAME_RATE};
use cyborg_core::state::GameSnapshot;
use cyborg_sim::engine::{GameEngine, SimConfig};

use crate::error::AppError;
use crate::state::GameLoopCommand;

/// Nominal duration of one frame at 1x speed.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// At or below this scale the host clock stands still.
const MIN_TIME_SCALE: f64 = 0.001;

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    sim: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameSnapshot>>>,
    listener: Option<mpsc::Sender<GameSnapshot>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>), AppError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let thread = std::thread::Builder::new()
        .name("cyborg-game-loop".into())
        .spawn(move || {
            run_game_loop(sim, cmd_rx, &latest_snapshot, listener);
        })
        .map_err(AppError::ThreadSpawn)?;

    Ok((cmd_tx, thread))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    sim: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameSnapshot>>,
    mut listener: Option<mpsc::Sender<GameSnapshot>>,
) {
    let mut engine = GameEngine::new(sim);
    let mut host_secs = 0.0;
    let mut next_frame_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!("game loop stopped at frame {}", engine.time().frame);
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Run one frame (engine handles pause semantics internally)
        let snapshot = engine.frame(host_secs);

        // 3. Forward to the listener, dropping it once it hangs up
        if let Some(tx) = &listener {
            if tx.send(snapshot.clone()).is_err() {
                debug!("snapshot listener disconnected");
                listener = None;
            }
        }

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Advance the host clock and sleep until the next frame,
        //    adjusting for time_scale
        let time_scale = engine.time_scale();
        let effective_frame_duration = if time_scale > MIN_TIME_SCALE {
            host_secs += FRAME_DT;
            FRAME_DURATION.div_f64(time_scale)
        } else {
            FRAME_DURATION
        };

        next_frame_time += effective_frame_duration;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > effective_frame_duration * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_frame_time = now;
        }
    }
}
