//! Jumping, gravity integration, and landing/ceiling resolution.

use cubehop_core::components::Platform;
use cubehop_core::constants::PLAYER_HALF_EXTENT;
use cubehop_core::types::{InputFlags, PlayerState, Tuning};

/// Start a jump if one was requested and the player is on the ground.
/// Returns true if a jump started.
pub fn start_jump(player: &mut PlayerState, input: &InputFlags, tuning: &Tuning) -> bool {
    if input.jump && !player.airborne {
        player.airborne = true;
        player.vertical_velocity = tuning.jump_velocity;
        return true;
    }
    false
}

/// Accelerate downward and move by the new vertical velocity.
pub fn integrate(player: &mut PlayerState, gravity: f32) {
    player.vertical_velocity += gravity;
    player.position.y += player.vertical_velocity;
}

/// Push the player out of any platform it ended up inside.
///
/// Falling (or at rest) snaps onto the top face and lands. Rising snaps
/// under the bottom face with zero velocity and stays airborne. Platforms
/// are tested in order against the player's box after each correction.
pub fn resolve_contacts(player: &mut PlayerState, platforms: &[Platform]) {
    for platform in platforms {
        let aabb = platform.aabb();
        if !player.aabb().intersects(&aabb) {
            continue;
        }

        if player.vertical_velocity <= 0.0 {
            player.position.y = aabb.max.y + PLAYER_HALF_EXTENT;
            player.vertical_velocity = 0.0;
            player.airborne = false;
        } else {
            player.position.y = aabb.min.y - PLAYER_HALF_EXTENT;
            player.vertical_velocity = 0.0;
        }
    }
}
