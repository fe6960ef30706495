//! Background music selection.
//!
//! There is no audio backend here; the director decides what should be
//! playing and reports changes. A missing track file is logged and the
//! change is still reported, so gameplay never depends on assets.

use std::path::{Path, PathBuf};

use cubehop_core::enums::MusicTrack;
use cubehop_core::state::MusicCue;

/// What the audio backend should do.
#[derive(Debug, Clone, PartialEq)]
pub enum MusicChange {
    Play {
        track: MusicTrack,
        path: PathBuf,
        looping: bool,
        volume: f32,
    },
    Stop,
}

#[derive(Debug)]
pub struct MusicDirector {
    sounds_dir: PathBuf,
    master_volume: f32,
    current: Option<MusicTrack>,
}

impl MusicDirector {
    pub fn new(sounds_dir: impl Into<PathBuf>, master_volume: f32) -> Self {
        Self {
            sounds_dir: sounds_dir.into(),
            master_volume,
            current: None,
        }
    }

    pub fn current(&self) -> Option<MusicTrack> {
        self.current
    }

    pub fn track_path(&self, track: MusicTrack) -> PathBuf {
        self.sounds_dir.join(track.file_name())
    }

    /// Follow the cue from the latest snapshot. Returns a change only when
    /// the track differs from what is already playing.
    pub fn update(&mut self, cue: Option<&MusicCue>) -> Option<MusicChange> {
        let wanted = cue.map(|c| c.track);
        if wanted == self.current {
            return None;
        }
        self.current = wanted;

        let Some(cue) = cue else {
            log::debug!("Music stopped");
            return Some(MusicChange::Stop);
        };

        let path = self.track_path(cue.track);
        if !track_exists(&path) {
            log::warn!("Music file not found: {}", path.display());
        }
        log::info!("Now playing {:?}", cue.track);

        Some(MusicChange::Play {
            track: cue.track,
            path,
            looping: cue.looping,
            volume: cue.volume * self.master_volume,
        })
    }
}

fn track_exists(path: &Path) -> bool {
    path.is_file()
}
