//! The two hand-authored levels.
//!
//! Platforms are authored as centre + full size boxes. Every coin sits on
//! the top face of a platform so it can be reached by standing on it.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cubehop_core::components::{Coin, Platform};
use cubehop_core::constants::{FINAL_LEVEL, FIRST_LEVEL};
use cubehop_core::enums::MusicTrack;

/// A platform box as authored: centre and full width/height/depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl PlatformSpec {
    pub const fn new(x: f32, y: f32, z: f32, width: f32, height: f32, depth: f32) -> Self {
        Self {
            x,
            y,
            z,
            width,
            height,
            depth,
        }
    }

    pub fn to_platform(&self) -> Platform {
        Platform::from_size(
            Vec3::new(self.x, self.y, self.z),
            Vec3::new(self.width, self.height, self.depth),
        )
    }
}

/// Static content of one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub number: u32,
    pub platforms: Vec<PlatformSpec>,
    pub coins: Vec<Vec3>,
    pub spawn: Vec3,
    pub music: MusicTrack,
}

#[derive(Debug, Error, PartialEq)]
pub enum LevelError {
    #[error("no level numbered {0}")]
    Unknown(u32),
    #[error("level {level}: platform {index} has a non-positive size")]
    DegeneratePlatform { level: u32, index: usize },
    #[error("level {level}: non-finite coordinate")]
    NonFinite { level: u32 },
    #[error("level {0} has no coins")]
    NoCoins(u32),
}

impl LevelDefinition {
    pub fn build_platforms(&self) -> Vec<Platform> {
        self.platforms.iter().map(PlatformSpec::to_platform).collect()
    }

    pub fn build_coins(&self) -> Vec<Coin> {
        self.coins.iter().copied().map(Coin::new).collect()
    }

    /// Reject data the step cannot handle sensibly.
    pub fn validate(&self) -> Result<(), LevelError> {
        let level = self.number;

        if self.coins.is_empty() {
            return Err(LevelError::NoCoins(level));
        }

        for (index, spec) in self.platforms.iter().enumerate() {
            let values = [spec.x, spec.y, spec.z, spec.width, spec.height, spec.depth];
            if values.iter().any(|v| !v.is_finite()) {
                return Err(LevelError::NonFinite { level });
            }
            if spec.width <= 0.0 || spec.height <= 0.0 || spec.depth <= 0.0 {
                return Err(LevelError::DegeneratePlatform { level, index });
            }
        }

        if !self.spawn.is_finite() || self.coins.iter().any(|c| !c.is_finite()) {
            return Err(LevelError::NonFinite { level });
        }

        Ok(())
    }
}

/// Look up a level by number.
pub fn level(number: u32) -> Result<LevelDefinition, LevelError> {
    match number {
        1 => Ok(build_level_one()),
        2 => Ok(build_level_two()),
        other => Err(LevelError::Unknown(other)),
    }
}

/// All authored levels in play order.
pub fn all_levels() -> Vec<LevelDefinition> {
    (FIRST_LEVEL..=FINAL_LEVEL).filter_map(|n| level(n).ok()).collect()
}

/// Level 1: a 10x10 base with five raised platforms around it.
fn build_level_one() -> LevelDefinition {
    LevelDefinition {
        number: 1,
        platforms: vec![
            PlatformSpec::new(0.0, 0.5, 0.0, 10.0, 1.0, 10.0), // base
            PlatformSpec::new(5.0, 2.5, -5.0, 5.0, 1.0, 5.0),  // middle
            PlatformSpec::new(-5.0, 4.5, 5.0, 3.0, 1.0, 3.0),  // top
            PlatformSpec::new(8.0, 3.5, 2.0, 4.0, 1.0, 4.0),   // right
            PlatformSpec::new(-8.0, 1.5, -3.0, 6.0, 1.0, 3.0), // low left
            PlatformSpec::new(2.0, 5.5, -2.0, 3.0, 1.0, 6.0),  // high
        ],
        coins: vec![
            Vec3::new(5.0, 3.0, -5.0),
            Vec3::new(-5.0, 5.0, 5.0),
            Vec3::new(8.0, 4.0, 2.0),
            Vec3::new(-8.0, 2.0, -3.0),
            Vec3::new(2.0, 6.0, -2.0),
        ],
        spawn: Vec3::new(0.0, 1.0, 0.0),
        music: MusicTrack::DayOfJoy,
    }
}

/// Level 2: a wider base, platforms staggered higher, one central tower.
fn build_level_two() -> LevelDefinition {
    LevelDefinition {
        number: 2,
        platforms: vec![
            PlatformSpec::new(0.0, 0.5, 0.0, 12.0, 1.0, 12.0), // base
            PlatformSpec::new(-6.0, 2.5, 6.0, 4.0, 1.0, 4.0),  // back left
            PlatformSpec::new(6.0, 4.5, -6.0, 5.0, 1.0, 5.0),  // front right
            PlatformSpec::new(0.0, 6.5, 0.0, 3.0, 1.0, 3.0),   // central tower
            PlatformSpec::new(-8.0, 3.5, -4.0, 6.0, 1.0, 3.0), // front left
            PlatformSpec::new(8.0, 5.5, 4.0, 4.0, 1.0, 4.0),   // back right
        ],
        coins: vec![
            Vec3::new(-6.0, 3.0, 6.0),
            Vec3::new(6.0, 5.0, -6.0),
            Vec3::new(0.0, 7.0, 0.0),
            Vec3::new(-8.0, 4.0, -4.0),
            Vec3::new(8.0, 6.0, 4.0),
        ],
        spawn: Vec3::new(0.0, 1.0, 0.0),
        music: MusicTrack::CallOfTheSands,
    }
}
