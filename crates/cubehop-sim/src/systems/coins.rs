//! Coin pickup and level-complete detection.

use cubehop_core::components::Coin;
use cubehop_core::constants::FINAL_LEVEL;
use cubehop_core::types::PlayerState;

/// Collect every live coin the player overlaps. Returns their indices in
/// ascending order; each one adds `coin_value` to the score.
pub fn collect(player: &mut PlayerState, coins: &[Coin], coin_value: u32) -> Vec<usize> {
    let player_box = player.aabb();
    let collected: Vec<usize> = coins
        .iter()
        .enumerate()
        .filter(|(_, coin)| !coin.collected && coin.aabb().intersects(&player_box))
        .map(|(index, _)| index)
        .collect();

    let gained = coin_value.saturating_mul(collected.len() as u32);
    player.score = player.score.saturating_add(gained);
    collected
}

/// Number of coins still live once `collected` are removed.
pub fn remaining(coins: &[Coin], collected: &[usize]) -> usize {
    coins.iter().filter(|c| !c.collected).count() - collected.len()
}

/// True on the tick the last coin of a non-final level is picked up.
/// Ticks that collect nothing never report completion, so the signal fires
/// once per level.
pub fn level_complete(coins: &[Coin], collected: &[usize], level: u32) -> bool {
    !collected.is_empty() && remaining(coins, collected) == 0 && level < FINAL_LEVEL
}
