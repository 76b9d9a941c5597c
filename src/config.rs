use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("gravity tick must be greater than zero")]
    ZeroGravityTick,
    #[error("frame rate must be greater than zero")]
    ZeroFrameRate,
}

/// Launcher settings, validated.
#[derive(Debug, Clone)]
pub struct Config {
    /// Seed for the shape generator; drawn from entropy when absent.
    pub seed: Option<u64>,
    pub gravity_tick: Duration,
    pub frame_time: Duration,
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
}

impl Config {
    pub fn new(
        seed: Option<u64>,
        gravity_ms: u64,
        fps: u32,
        log_file: Option<PathBuf>,
        verbose: bool,
    ) -> Result<Self, ConfigError> {
        if gravity_ms == 0 {
            return Err(ConfigError::ZeroGravityTick);
        }
        if fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }

        Ok(Self {
            seed,
            gravity_tick: Duration::from_millis(gravity_ms),
            frame_time: Duration::from_secs(1) / fps,
            log_file,
            verbose,
        })
    }
}
