//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen. Nothing is simulated.
    #[default]
    TitleScreen,
    Playing,
    Paused,
}

/// Level change requested by a step. The engine performs the actual load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelTransition {
    #[default]
    None,
    /// Game over: reload the (reset) current level, which is always level 1.
    ReloadCurrent,
    /// Every coin of level 1 collected: load level 2.
    AdvanceToNext,
}

/// Background music, one track per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MusicTrack {
    DayOfJoy,
    CallOfTheSands,
}

impl MusicTrack {
    /// Asset file name under the sounds directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            MusicTrack::DayOfJoy => "Ventum-Day of joy.mp3",
            MusicTrack::CallOfTheSands => "Ventum-Call of the Sands.mp3",
        }
    }
}
