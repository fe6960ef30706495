//! Support detection: which platform is the player touching?

use cubehop_core::components::Platform;
use cubehop_core::types::{Aabb, PlayerState};

/// Bounding box of the platform intersecting the player, if any.
///
/// When the player straddles several platforms the last one in iteration
/// order wins.
pub fn current_platform(player: &PlayerState, platforms: &[Platform]) -> Option<Aabb> {
    let player_box = player.aabb();
    platforms
        .iter()
        .map(Platform::aabb)
        .filter(|aabb| player_box.intersects(aabb))
        .last()
}
