//! The per-tick player state machine.
//!
//! `step` is a pure function: it reads the previous `PlayerState`, the
//! held keys and the live level content, and returns the next state plus
//! what happened. It never touches the ECS world; the engine applies the
//! outcome (despawning coins, loading levels).

use glam::Vec3;

use cubehop_core::components::{Coin, Platform};
use cubehop_core::enums::LevelTransition;
use cubehop_core::types::{InputFlags, PlayerState, Tuning};

use crate::systems::fall_out::FallOut;
use crate::systems::{coins, fall_out, gravity, movement, support};

/// Result of one step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub player: PlayerState,
    /// Indices into the `coins` slice picked up this step, ascending.
    pub collected: Vec<usize>,
    pub fall_out: FallOut,
    pub jumped: bool,
    pub transition: LevelTransition,
}

/// Advance the player by one tick.
pub fn step(
    player: &PlayerState,
    input: &InputFlags,
    platforms: &[Platform],
    coins: &[Coin],
    spawn: Vec3,
    tuning: &Tuning,
) -> StepOutcome {
    let mut next = *player;
    let mut transition = LevelTransition::None;

    // 1. Support detection
    let support = support::current_platform(&next, platforms);

    // 2. Lateral movement
    movement::apply_lateral(&mut next, input, support.as_ref(), tuning.move_step);

    // 3. Manual vertical movement while grounded
    if !next.airborne {
        if let Some(platform) = &support {
            movement::apply_vertical(&mut next, input, platform, tuning.move_step);
        }
    }

    // 4. Jump start
    let jumped = gravity::start_jump(&mut next, input, tuning);

    // 5-6. Gravity, then landing/ceiling resolution
    if next.airborne || support.is_none() {
        gravity::integrate(&mut next, tuning.gravity);
        gravity::resolve_contacts(&mut next, platforms);
    }

    // 7. Fall-out
    let fall_out = fall_out::run(&mut next, spawn, tuning);
    if fall_out == FallOut::GameOver {
        transition = LevelTransition::ReloadCurrent;
    }

    // 8. Coin collection. Skipped on game over: the coin set is about to be
    //    replaced and the score was just reset.
    let collected = if transition == LevelTransition::ReloadCurrent {
        Vec::new()
    } else {
        coins::collect(&mut next, coins, tuning.coin_value)
    };

    // 9. Level advance
    if coins::level_complete(coins, &collected, next.level) {
        transition = LevelTransition::AdvanceToNext;
    }

    StepOutcome {
        player: next,
        collected,
        fall_out,
        jumped,
        transition,
    }
}
