//! Command-line parsing for the `cyborg` binary.
//!
//! Usage:
//!   cyborg run --seed 7 --frames 1200 --tap-mode highlight --out run.jsonl
//!   cyborg print-config --config tuning.toml

use std::path::{Path, PathBuf};
use std::str::FromStr;

use cyborg_core::config::GameConfig;
use cyborg_core::enums::TapMode;
use cyborg_sim::engine::SimConfig;

use crate::error::AppError;
use crate::runner::RunOptions;

/// A parsed invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Run(RunArgs),
    PrintConfig { config: Option<PathBuf> },
    Help,
}

/// Flags of the `run` command.
#[derive(Debug, Clone, PartialEq)]
pub struct RunArgs {
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub frames: u64,
    pub tap_mode: Option<TapMode>,
    pub snapshot_every: u64,
    pub tap_every: u64,
    pub out: Option<PathBuf>,
    pub realtime: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        let defaults = RunOptions::default();
        Self {
            config: None,
            seed: None,
            frames: defaults.frames,
            tap_mode: None,
            snapshot_every: defaults.snapshot_every,
            tap_every: defaults.tap_every,
            out: None,
            realtime: false,
        }
    }
}

impl RunArgs {
    /// Load the config file (if any) and apply command-line overrides.
    pub fn to_options(&self) -> Result<RunOptions, AppError> {
        let mut game = load_config(self.config.as_deref())?;
        if let Some(mode) = self.tap_mode {
            game.tap.mode = mode;
        }

        let mut sim = SimConfig {
            game,
            ..Default::default()
        };
        if let Some(seed) = self.seed {
            sim.seed = seed;
        }

        Ok(RunOptions {
            sim,
            frames: self.frames,
            snapshot_every: self.snapshot_every,
            tap_every: self.tap_every,
            realtime: self.realtime,
        })
    }
}

/// Config from `path`, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<GameConfig, AppError> {
    match path {
        Some(path) => Ok(GameConfig::load_from_file(path)?),
        None => Ok(GameConfig::default()),
    }
}

pub fn usage() -> &'static str {
    "cyborg: headless CYBORG scene runner\n\
     \n\
     Commands:\n\
     \n\
     run           Run a session and write snapshots as JSON lines (default)\n\
     \n\
       --config <path>        TOML tuning file (every field optional)\n\
       --seed <n>             RNG seed (default: 42)\n\
       --frames <n>           Frames to run at 60Hz (default: 600)\n\
       --tap-mode <mode>      highlight | fire\n\
       --tap-every <n>        Tap the screen center every n frames, 0 = never (default: 30)\n\
       --snapshot-every <n>   Write every n-th snapshot, 0 = last only (default: 60)\n\
       --out <path>           Output file (default: stdout)\n\
       --realtime             Run on the game loop thread at wall-clock pace\n\
     \n\
     print-config  Print the effective config as TOML\n\
     \n\
       --config <path>        TOML tuning file\n\
     \n\
     help          Show this message\n\
     \n\
     Log level follows RUST_LOG (default: info).\n"
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<CliCommand, AppError> {
    let (command, flags) = match args.first().map(String::as_str) {
        None => ("run", args),
        Some("--help" | "-h") => ("help", args),
        Some(first) if first.starts_with("--") => ("run", args),
        Some(first) => (first, &args[1..]),
    };

    match command {
        "run" => parse_run(flags).map(CliCommand::Run),
        "print-config" => {
            check_flags(flags, &["--config"], &[])?;
            Ok(CliCommand::PrintConfig {
                config: parse_flag::<PathBuf>(flags, "--config")?,
            })
        }
        "help" => Ok(CliCommand::Help),
        other => Err(AppError::Usage(format!("unknown command: {other}"))),
    }
}

fn parse_run(args: &[String]) -> Result<RunArgs, AppError> {
    check_flags(
        args,
        &[
            "--config",
            "--seed",
            "--frames",
            "--tap-mode",
            "--tap-every",
            "--snapshot-every",
            "--out",
        ],
        &["--realtime"],
    )?;

    let defaults = RunArgs::default();
    let frames = parse_flag(args, "--frames")?.unwrap_or(defaults.frames);
    if frames == 0 {
        return Err(AppError::Usage("--frames must be at least 1".into()));
    }

    Ok(RunArgs {
        config: parse_flag(args, "--config")?,
        seed: parse_flag(args, "--seed")?,
        frames,
        tap_mode: parse_flag(args, "--tap-mode")?,
        snapshot_every: parse_flag(args, "--snapshot-every")?.unwrap_or(defaults.snapshot_every),
        tap_every: parse_flag(args, "--tap-every")?.unwrap_or(defaults.tap_every),
        out: parse_flag(args, "--out")?,
        realtime: args.iter().any(|a| a == "--realtime"),
    })
}

/// Reject anything that is not a known flag or the value of one.
fn check_flags(args: &[String], valued: &[&str], switches: &[&str]) -> Result<(), AppError> {
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if valued.contains(&arg) {
            if i + 1 >= args.len() {
                return Err(AppError::Usage(format!("{arg} needs a value")));
            }
            i += 2;
        } else if switches.contains(&arg) {
            i += 1;
        } else {
            return Err(AppError::Usage(format!("unexpected argument: {arg}")));
        }
    }
    Ok(())
}

/// Value following `name`, parsed. The last occurrence wins.
fn parse_flag<T>(args: &[String], name: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let mut value = None;
    for i in 0..args.len() {
        if args[i] == name && i + 1 < args.len() {
            let parsed = args[i + 1]
                .parse::<T>()
                .map_err(|e| AppError::Usage(format!("invalid {name} '{}': {e}", args[i + 1])))?;
            value = Some(parsed);
        }
    }
    Ok(value)
}
