//! Cleanup system: removes collected coins from the arena.

use hecs::{Entity, World};

use cubehop_core::components::Coin;

/// Despawn every coin flagged as collected.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, coin) in world.query_mut::<&Coin>() {
        if coin.collected {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
