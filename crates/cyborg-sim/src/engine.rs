//! Game engine: the core of the game.
//!
//! `GameEngine` owns the hecs ECS world, processes host commands, runs all
//! systems once per rendered frame, and produces `GameSnapshot`s. Completely
//! headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::{Entity, World};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use cyborg_core::commands::PlayerCommand;
use cyborg_core::components::{Enemy, Transform};
use cyborg_core::config::GameConfig;
use cyborg_core::constants::MAX_TIME_SCALE;
use cyborg_core::enums::{CullPolicy, GamePhase, TapMode};
use cyborg_core::events::GameEvent;
use cyborg_core::state::GameSnapshot;
use cyborg_core::types::{Acceleration, FrameTime};

use crate::frustum::camera_pose;
use crate::random::UniformRange;
use crate::scheduler::Scheduler;
use crate::systems;
use crate::systems::contact::Contact;
use crate::systems::snapshot::SnapshotContext;
use crate::systems::spawner::SpawnTimers;
use crate::world_setup;

/// Configuration for starting a new game.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same city.
    pub seed: u64,
    /// Initial time scale for the host loop (1.0 = normal).
    pub time_scale: f64,
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            game: GameConfig::default(),
        }
    }
}

/// Running totals reported in every snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneCounters {
    pub spawned_total: u64,
    pub culled_total: u64,
    pub destroyed_total: u64,
    pub bullets_fired: u64,
}

/// The game engine. Owns the ECS world and all game state.
pub struct GameEngine<R: UniformRange = ChaCha8Rng> {
    world: World,
    config: GameConfig,
    rng: R,
    camera: Entity,
    player: Entity,
    time: FrameTime,
    last_host_secs: Option<f64>,
    paused_secs: f64,
    phase: GamePhase,
    tap_mode: TapMode,
    time_scale: f64,
    timers: SpawnTimers,
    scheduler: Scheduler,
    command_queue: VecDeque<PlayerCommand>,
    contact_queue: VecDeque<Contact>,
    motion: Option<Acceleration>,
    pending_taps: Vec<Vec2>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
    counters: SceneCounters,
    leak_warned: bool,
}

impl GameEngine<ChaCha8Rng> {
    /// Create a new engine with a ChaCha RNG seeded from the config.
    pub fn new(config: SimConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut engine = Self::with_rng(config.game, rng);
        engine.time_scale = config.time_scale.clamp(0.0, MAX_TIME_SCALE);
        info!("game started with seed {}", config.seed);
        engine
    }
}

impl<R: UniformRange> GameEngine<R> {
    /// Create an engine drawing every random placement from `rng`.
    /// The camera and player are created immediately.
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let mut world = World::new();
        let camera = world_setup::spawn_camera(&mut world, &config.camera);
        let player =
            world_setup::spawn_player(&mut world, &config.player, config.camera.start_position.z);

        Self {
            world,
            tap_mode: config.tap.mode,
            config,
            rng,
            camera,
            player,
            time: FrameTime::default(),
            last_host_secs: None,
            paused_secs: 0.0,
            phase: GamePhase::default(),
            time_scale: 1.0,
            timers: SpawnTimers::default(),
            scheduler: Scheduler::new(),
            command_queue: VecDeque::new(),
            contact_queue: VecDeque::new(),
            motion: None,
            pending_taps: Vec::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            counters: SceneCounters::default(),
            leak_warned: false,
        }
    }

    /// Queue a command for processing at the start of the next frame.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Per-frame callback. `host_secs` is the host's monotonically
    /// increasing frame time; a value that goes backwards counts as no time.
    pub fn frame(&mut self, host_secs: f64) -> GameSnapshot {
        self.process_commands();
        self.advance_clock(host_secs);

        // Contacts found last frame are applied even when paused, so a
        // contact pair never outlives the frame after it was found.
        systems::contact::resolve(
            &mut self.world,
            &mut self.scheduler,
            &mut self.contact_queue,
            &mut self.events,
            &mut self.counters,
        );

        if self.phase == GamePhase::Running {
            self.run_systems();
        } else if !self.pending_taps.is_empty() {
            debug!("dropped {} taps while paused", self.pending_taps.len());
            self.pending_taps.clear();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotContext {
                time: self.time,
                phase: self.phase,
                tap_mode: self.tap_mode,
                camera: self.camera,
                player: self.player,
                counters: &self.counters,
                pending_tasks: self.scheduler.pending(),
            },
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current frame timing.
    pub fn time(&self) -> FrameTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Get the current tap mode.
    pub fn tap_mode(&self) -> TapMode {
        self.tap_mode
    }

    /// Get the active configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> Entity {
        self.camera
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    /// Number of contacts waiting to be resolved next frame.
    pub fn pending_contacts(&self) -> usize {
        self.contact_queue.len()
    }

    /// Get a read-only reference to the scheduler.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Mutable world access for tests that stage scenes by hand.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Update host time, frame delta and the game clock. Time spent paused
    /// is excluded from the game clock.
    fn advance_clock(&mut self, host_secs: f64) {
        let dt = self
            .last_host_secs
            .map_or(0.0, |last| (host_secs - last).max(0.0));
        self.last_host_secs = Some(self.last_host_secs.map_or(host_secs, |last| last.max(host_secs)));

        if self.phase == GamePhase::Paused {
            self.paused_secs += dt;
            self.time.dt = 0.0;
        } else {
            self.time.dt = dt;
        }

        self.time.frame += 1;
        self.time.host_secs = host_secs;
        self.time.game_secs = (host_secs - self.paused_secs).max(self.time.game_secs);
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Tap { x, y } => self.pending_taps.push(Vec2::new(x, y)),
            PlayerCommand::SetTapMode { mode } => {
                debug!("tap mode set to {mode:?}");
                self.tap_mode = mode;
            }
            PlayerCommand::MotionSample { x, y, z } => {
                self.motion = Some(Acceleration::new(x, y, z));
            }
            PlayerCommand::StopMotionUpdates => {
                self.motion = None;
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Running {
                    info!("paused at {:.3}s", self.time.game_secs);
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    info!("resumed at {:.3}s", self.time.game_secs);
                    self.phase = GamePhase::Running;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                if scale.is_finite() {
                    self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
                } else {
                    warn!("ignored non-finite time scale {scale}");
                }
            }
        }
    }

    fn handle_tap(&mut self, point: Vec2) {
        let now = self.time.game_secs;
        match self.tap_mode {
            TapMode::Fire => {
                systems::tap::fire(
                    &mut self.world,
                    &mut self.scheduler,
                    self.player,
                    &self.config.bullet,
                    now,
                    &mut self.events,
                    &mut self.counters,
                );
            }
            TapMode::Highlight => {
                let Some((transform, lens)) = camera_pose(&self.world, self.camera) else {
                    return;
                };
                systems::tap::highlight(
                    &mut self.world,
                    &mut self.scheduler,
                    (&transform, &lens),
                    &self.config.tap,
                    point,
                    now,
                    &mut self.events,
                );
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now = self.time.game_secs;
        let dt = self.time.dt;

        // 1. Taps received since the last frame
        for point in std::mem::take(&mut self.pending_taps) {
            self.handle_tap(point);
        }
        // 2. Spawn timers (relative to where the camera is now)
        let camera_z = self.camera_z();
        systems::spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.timers,
            &self.config,
            now,
            camera_z,
            &mut self.events,
            &mut self.counters,
        );
        // 3. Movement (camera pan, spin, timed moves)
        systems::movement::run(&mut self.world, dt, now);
        // 4. Player follows the camera and integrates tilt
        let camera_z = self.camera_z();
        systems::player::follow_camera(&mut self.world, self.player, camera_z, &self.config.player);
        systems::player::apply_tilt(&mut self.world, self.player, self.motion, &self.config.player);
        // 5. Scheduled tasks
        systems::actions::run(&mut self.world, &mut self.scheduler, now, &mut self.events);
        // 6. Contact detection (resolved next frame)
        systems::contact::detect(&self.world, &mut self.contact_queue, &mut self.events);
        // 7. Cull
        if let Some((transform, lens)) = camera_pose(&self.world, self.camera) {
            systems::cull::run(
                &mut self.world,
                &mut self.scheduler,
                (&transform, &lens),
                self.config.cull.policy,
                &mut self.despawn_buffer,
                &mut self.events,
                &mut self.counters,
            );
        }
        self.check_enemy_leak();
    }

    fn camera_z(&self) -> f32 {
        self.world
            .get::<&Transform>(self.camera)
            .map(|t| t.position.z)
            .unwrap_or_default()
    }

    /// Under `BuildingsOnly` nothing reaps enemies that were never hit.
    fn check_enemy_leak(&mut self) {
        if self.config.cull.policy != CullPolicy::BuildingsOnly {
            return;
        }
        let enemies = self.world.query::<&Enemy>().iter().count();
        let threshold = self.config.cull.enemy_leak_warn_threshold;
        if enemies > threshold && !self.leak_warned {
            warn!("{enemies} enemies alive; buildings-only culling never removes missed enemies");
            self.leak_warned = true;
        } else if enemies <= threshold {
            self.leak_warned = false;
        }
    }
}
