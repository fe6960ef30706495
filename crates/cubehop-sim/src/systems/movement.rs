//! Keyboard-driven displacement.
//!
//! Lateral moves are clamped to the supporting platform's footprint, so a
//! grounded player cannot walk off an edge. Without support the same moves
//! apply unclamped (air control).

use cubehop_core::constants::PLAYER_HALF_EXTENT;
use cubehop_core::types::{Aabb, InputFlags, PlayerState};

/// Apply left/right/forward/backward for one tick.
pub fn apply_lateral(
    player: &mut PlayerState,
    input: &InputFlags,
    support: Option<&Aabb>,
    step: f32,
) {
    let (dx, dz) = input.lateral_delta(step);
    player.position.x += dx;
    player.position.z += dz;

    if let Some(platform) = support {
        player.position.x = clamp_axis(
            player.position.x,
            platform.min.x + PLAYER_HALF_EXTENT,
            platform.max.x - PLAYER_HALF_EXTENT,
        );
        player.position.z = clamp_axis(
            player.position.z,
            platform.min.z + PLAYER_HALF_EXTENT,
            platform.max.z - PLAYER_HALF_EXTENT,
        );
    }
}

/// Apply up/down while standing on `support`.
///
/// The band runs from half-embedded in the platform to resting on its top.
pub fn apply_vertical(player: &mut PlayerState, input: &InputFlags, support: &Aabb, step: f32) {
    player.position.y += input.vertical_delta(step);
    player.position.y = clamp_axis(
        player.position.y,
        support.min.y + PLAYER_HALF_EXTENT,
        support.max.y + PLAYER_HALF_EXTENT,
    );
}

/// `max(lo, min(hi, value))`. Unlike `f32::clamp` this tolerates `lo > hi`
/// (a platform narrower than the player) and settles on `lo`.
fn clamp_axis(value: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(value))
}
