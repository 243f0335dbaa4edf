//! Application state shared between the command side and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use log::info;

use cyborg_core::commands::PlayerCommand;
use cyborg_core::state::GameSnapshot;
use cyborg_sim::engine::SimConfig;

use crate::error::AppError;
use crate::game_loop;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// Everything is behind a `Mutex` so the state can be shared by reference
/// across threads:
/// - `mpsc::Sender` is Send but not Sync
/// - the loop thread exists only between `start` and `shutdown`
/// - the latest snapshot is shared with the loop thread through an `Arc`
pub struct AppState {
    /// Channel sender to the game loop thread. `None` until `start`.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot for synchronous polling. Updated every frame.
    pub latest_snapshot: Arc<Mutex<Option<GameSnapshot>>>,
    /// Whether the game loop is currently running.
    pub running: Mutex<bool>,
    loop_thread: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
            loop_thread: Mutex::new(None),
        }
    }
}

/// A poisoned lock only means the other side panicked mid-frame; the data
/// behind it is still usable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the game loop thread. Every snapshot is also forwarded to
    /// `listener` when one is given.
    pub fn start(
        &self,
        sim: SimConfig,
        listener: Option<mpsc::Sender<GameSnapshot>>,
    ) -> Result<(), AppError> {
        let mut running = lock(&self.running);
        if *running {
            return Err(AppError::AlreadyRunning);
        }

        let (cmd_tx, thread) =
            game_loop::spawn_game_loop(sim, self.latest_snapshot.clone(), listener)?;
        *lock(&self.command_tx) = Some(cmd_tx);
        *lock(&self.loop_thread) = Some(thread);
        *running = true;
        Ok(())
    }

    /// Forward a player command to the engine.
    pub fn send_command(&self, command: PlayerCommand) -> Result<(), AppError> {
        match lock(&self.command_tx).as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::PlayerCommand(command))
                .map_err(|_| AppError::NotRunning),
            None => Err(AppError::NotRunning),
        }
    }

    /// Latest snapshot, if the loop has produced one.
    pub fn snapshot(&self) -> Option<GameSnapshot> {
        lock(&self.latest_snapshot).clone()
    }

    /// Stop the game loop and wait for its thread to finish.
    pub fn shutdown(&self) -> Result<(), AppError> {
        let mut running = lock(&self.running);
        if !*running {
            return Err(AppError::NotRunning);
        }

        if let Some(tx) = lock(&self.command_tx).take() {
            // The loop also stops on disconnect, so a failed send is fine.
            let _ = tx.send(GameLoopCommand::Shutdown);
        }
        *running = false;

        let thread = lock(&self.loop_thread).take();
        if let Some(thread) = thread {
            thread.join().map_err(|_| AppError::LoopPanicked)?;
        }
        info!("game loop shut down");
        Ok(())
    }
}
