//! Events emitted by the simulation for audio and UI feedback.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Gameplay events, drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A level's platforms and coins were (re)spawned.
    LevelLoaded { level: u32 },
    /// A coin was picked up. `score` is the total after the pickup.
    CoinCollected { position: Vec3, score: u32 },
    /// The player fell out of the world.
    LifeLost { lives_remaining: u32 },
    /// The last life was lost; lives and score were reset.
    GameOver,
    /// The final level has no coins left.
    LevelCleared { level: u32 },
}
