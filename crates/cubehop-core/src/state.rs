//! Game state snapshot — the complete visible state sent to the host each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{GamePhase, MusicTrack};
use crate::events::GameEvent;
use crate::types::SimTime;

/// Complete game state published after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub level: u32,
    pub lives: u32,
    pub score: u32,
    pub player: PlayerView,
    pub camera: CameraView,
    pub platforms: Vec<PlatformView>,
    pub coins: Vec<CoinView>,
    pub coins_remaining: u32,
    /// The final level's coins are all collected.
    pub level_cleared: bool,
    pub music: Option<MusicCue>,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec3,
    pub vertical_velocity: f32,
    pub airborne: bool,
}

/// Where the camera wants to be. Smoothing is up to the renderer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CameraView {
    /// Look-at point (the player).
    pub target: Vec3,
    /// Player position plus the fixed camera offset.
    pub desired_position: Vec3,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlatformView {
    pub position: Vec3,
    pub size: Vec3,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoinView {
    pub position: Vec3,
}

/// Music that should be playing for the current level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MusicCue {
    pub track: MusicTrack,
    pub looping: bool,
    pub volume: f32,
}
