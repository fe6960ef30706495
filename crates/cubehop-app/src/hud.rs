//! One-line heads-up display.

use cubehop_core::enums::GamePhase;
use cubehop_core::state::GameStateSnapshot;

pub const TITLE_LINE: &str = "CUBEHOP - press Enter to start";

/// `Lives: N | Score: N | Level: N`, with a congratulation once the final
/// level is cleared.
pub fn hud_line(snapshot: &GameStateSnapshot) -> String {
    if snapshot.phase == GamePhase::TitleScreen {
        return TITLE_LINE.to_string();
    }

    let mut line = format!(
        "Lives: {} | Score: {} | Level: {}",
        snapshot.lives, snapshot.score, snapshot.level
    );
    if snapshot.level_cleared {
        line.insert_str(0, "Well done! ");
    }
    if snapshot.phase == GamePhase::Paused {
        line.push_str(" | Paused");
    }
    line
}
