//! Fall-out: losing a life below the world, and game over.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use cubehop_core::constants::FIRST_LEVEL;
use cubehop_core::types::{PlayerState, Tuning};

/// What the fall-out check did this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallOut {
    #[default]
    Safe,
    /// A life was lost; the player is back at spawn.
    LifeLost,
    /// The last life was lost; lives, score and level were reset.
    GameOver,
}

/// Respawn the player if it dropped below the fall-out height.
pub fn run(player: &mut PlayerState, spawn: Vec3, tuning: &Tuning) -> FallOut {
    if player.position.y >= tuning.fall_out_y {
        return FallOut::Safe;
    }

    player.lives = player.lives.saturating_sub(1);
    player.respawn(spawn);

    if player.lives > 0 {
        return FallOut::LifeLost;
    }

    player.lives = tuning.starting_lives;
    player.score = 0;
    player.level = FIRST_LEVEL;
    FallOut::GameOver
}
