//! Host configuration, loaded from an optional JSON file.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes. `sim` is handed to the engine untouched.

use std::path::{Path, PathBuf};
use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cubehop_core::constants::{CAMERA_OFFSET, CAMERA_SMOOTHING_SECS, TICK_RATE};
use cubehop_sim::SimConfig;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Ticks per second of the real-time loop.
    pub tick_rate: u32,
    pub camera_offset: [f32; 3],
    /// Time for the camera to catch up with the player.
    pub camera_smoothing_secs: f32,
    /// Directory holding the music files.
    pub sounds_dir: PathBuf,
    /// Multiplier applied to the music cue volume (0.0 - 1.0).
    pub master_volume: f32,
    pub sim: SimConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            camera_offset: CAMERA_OFFSET,
            camera_smoothing_secs: CAMERA_SMOOTHING_SECS,
            sounds_dir: PathBuf::from("sounds"),
            master_volume: 1.0,
            sim: SimConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_rate",
                reason: "must be at least 1".into(),
            });
        }
        if !self.camera_offset.iter().all(|v| v.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "camera_offset",
                reason: "must be finite".into(),
            });
        }
        if !(self.camera_smoothing_secs.is_finite() && self.camera_smoothing_secs >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "camera_smoothing_secs",
                reason: format!("{} is not a non-negative duration", self.camera_smoothing_secs),
            });
        }
        if !(0.0..=1.0).contains(&self.master_volume) {
            return Err(ConfigError::Invalid {
                field: "master_volume",
                reason: format!("{} is outside 0.0..=1.0", self.master_volume),
            });
        }
        Ok(())
    }

    /// Wall-clock duration of one tick.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.tick_rate.max(1)))
    }

    /// Seconds per tick, for camera smoothing.
    pub fn tick_secs(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    pub fn camera_offset(&self) -> Vec3 {
        Vec3::from_array(self.camera_offset)
    }
}
