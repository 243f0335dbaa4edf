//! Application-level errors.

use thiserror::Error;

use cyborg_core::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to spawn game loop thread: {0}")]
    ThreadSpawn(std::io::Error),

    #[error("game loop is not running")]
    NotRunning,

    #[error("game loop is already running")]
    AlreadyRunning,

    #[error("game loop thread panicked")]
    LoopPanicked,

    #[error("{0}")]
    Usage(String),
}
