//! Turns engine snapshots into what a frontend shows: smoothed camera,
//! HUD text and music changes.

use serde::Serialize;

use cubehop_core::state::GameStateSnapshot;

use crate::audio::{MusicChange, MusicDirector};
use crate::camera::{CameraPose, CameraRig};
use crate::config::AppConfig;
use crate::hud;

/// Everything a frontend needs for one tick.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub snapshot: GameStateSnapshot,
    pub camera: CameraPose,
    pub hud: String,
}

pub struct Presenter {
    camera: CameraRig,
    music: MusicDirector,
    dt: f32,
}

impl Presenter {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            camera: CameraRig::new(config.camera_offset(), config.camera_smoothing_secs),
            music: MusicDirector::new(config.sounds_dir.clone(), config.master_volume),
            dt: config.tick_secs(),
        }
    }

    /// Present one snapshot. Returns the frame and any music change.
    pub fn present(&mut self, snapshot: GameStateSnapshot) -> (Frame, Option<MusicChange>) {
        let music = self.music.update(snapshot.music.as_ref());
        let camera = self.camera.update(snapshot.camera.target, self.dt);
        let hud = hud::hud_line(&snapshot);

        let frame = Frame {
            snapshot,
            camera,
            hud,
        };
        (frame, music)
    }
}
