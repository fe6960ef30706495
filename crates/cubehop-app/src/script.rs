//! Scripted input replay.
//!
//! A script is a JSON list of segments. Each segment queues its commands,
//! holds its keys for `frames` ticks, and moves on. Replays run as fast as
//! the engine allows and are fully deterministic.
//!
//! ```json
//! { "segments": [
//!     { "commands": [{ "type": "StartGame" }] },
//!     { "frames": 5, "input": { "up": true } },
//!     { "frames": 60, "input": { "left": true, "jump": true } }
//! ] }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cubehop_core::commands::GameCommand;
use cubehop_core::events::GameEvent;
use cubehop_core::types::InputFlags;
use cubehop_sim::SimulationEngine;

use crate::audio::MusicChange;
use crate::config::AppConfig;
use crate::presenter::{Frame, Presenter};

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Script has no segments")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Ticks to hold `input` for. Zero only applies the commands.
    #[serde(default)]
    pub frames: u32,
    #[serde(default)]
    pub input: InputFlags,
    /// Queued before the first tick of the segment.
    #[serde(default)]
    pub commands: Vec<GameCommand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub segments: Vec<Segment>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        let script: Self = serde_json::from_str(json)?;
        if script.segments.is_empty() {
            return Err(ScriptError::Empty);
        }
        Ok(script)
    }

    /// Total ticks the script runs for.
    pub fn total_frames(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.frames)).sum()
    }
}

/// Outcome of a replay.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub frames: u64,
    /// Last presented frame, if the script ticked at all.
    pub last_frame: Option<Frame>,
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    pub music_changes: Vec<MusicChange>,
}

/// Run `script` against a fresh engine built from `config`.
pub fn replay(script: &Script, config: &AppConfig) -> ReplayReport {
    let mut engine = SimulationEngine::new(config.sim);
    let mut presenter = Presenter::new(config);
    let mut report = ReplayReport {
        frames: 0,
        last_frame: None,
        events: Vec::new(),
        music_changes: Vec::new(),
    };

    for segment in &script.segments {
        engine.queue_commands(segment.commands.iter().cloned());
        engine.queue_command(GameCommand::SetInput {
            input: segment.input,
        });

        for _ in 0..segment.frames {
            let snapshot = engine.tick();
            report.events.extend(snapshot.events.iter().cloned());

            let (frame, music) = presenter.present(snapshot);
            report.music_changes.extend(music);
            report.last_frame = Some(frame);
            report.frames += 1;
        }
    }

    log::debug!(
        "Replayed {} frames, {} events",
        report.frames,
        report.events.len()
    );
    report
}
