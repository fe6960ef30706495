//! Commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::InputFlags;

/// All possible player and host actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameCommand {
    /// Leave the start screen and load level 1 with a fresh player.
    StartGame,
    /// Replace the held keys. A set `jump` flag also latches a jump.
    SetInput { input: InputFlags },
    /// Latch a jump for the next tick.
    PressJump,
    /// Debug shortcut: toggle between level 1 and level 2.
    SwitchLevel,
    Pause,
    Resume,
    /// Drop the current game and go back to the start screen.
    ReturnToTitle,
}
