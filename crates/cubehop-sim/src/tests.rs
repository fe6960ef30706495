//! Tests for the player step, its systems, level data, and the engine lifecycle.

use glam::Vec3;

use cubehop_core::commands::GameCommand;
use cubehop_core::components::{Coin, LevelTag, Platform};
use cubehop_core::constants::*;
use cubehop_core::enums::*;
use cubehop_core::events::GameEvent;
use cubehop_core::types::{InputFlags, PlayerState, Tuning};

use crate::engine::{SimConfig, SimulationEngine};
use crate::levels::{self, LevelError, PlatformSpec};
use crate::step::step;
use crate::systems::fall_out::FallOut;

const SPAWN: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// The 10x10 base: x in [-5, 5], y in [0, 1], z in [-5, 5].
fn base_platform() -> Platform {
    Platform::from_size(Vec3::new(0.0, 0.5, 0.0), Vec3::new(10.0, 1.0, 10.0))
}

fn player_at(position: Vec3) -> PlayerState {
    PlayerState {
        position,
        ..PlayerState::new(SPAWN)
    }
}

fn held(f: impl FnOnce(&mut InputFlags)) -> InputFlags {
    let mut input = InputFlags::default();
    f(&mut input);
    input
}

fn started_engine() -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(GameCommand::StartGame);
    engine.tick();
    engine
}

fn live_coin_count(engine: &SimulationEngine) -> usize {
    let mut query = engine.world().query::<&Coin>();
    query.iter().filter(|(_, coin)| !coin.collected).count()
}

// ---- Support and gravity ----

#[test]
fn test_gravity_applies_without_support_even_when_grounded() {
    let platforms = [base_platform()];
    let player = player_at(Vec3::new(0.0, 3.0, 0.0));
    assert!(!player.airborne);

    let outcome = step(
        &player,
        &InputFlags::default(),
        &platforms,
        &[],
        SPAWN,
        &Tuning::default(),
    );

    assert!((outcome.player.vertical_velocity - GRAVITY).abs() < 1e-6);
    assert!((outcome.player.position.y - (3.0 + GRAVITY)).abs() < 1e-6);
}

#[test]
fn test_falling_player_lands_on_top_face() {
    let platforms = [base_platform()];
    let tuning = Tuning::default();
    let mut player = player_at(Vec3::new(1.0, 3.0, -2.0));

    for _ in 0..30 {
        player = step(&player, &InputFlags::default(), &platforms, &[], SPAWN, &tuning).player;
    }

    assert_eq!(player.position.y, 1.5, "Should rest on the top face");
    assert_eq!(player.vertical_velocity, 0.0);
    assert!(!player.airborne);
    assert_eq!(player.lives, STARTING_LIVES);
}

#[test]
fn test_landing_is_idempotent() {
    let platforms = [base_platform()];
    let tuning = Tuning::default();
    let resting = player_at(Vec3::new(0.0, 1.5, 0.0));
    let mut player = resting;

    for _ in 0..200 {
        player = step(&player, &InputFlags::default(), &platforms, &[], SPAWN, &tuning).player;
        assert_eq!(player, resting, "Resting player must not drift");
    }
}

#[test]
fn test_overlapping_platforms_last_one_supports() {
    // Narrow strip x in [2, 4] authored after the base, overlapping it.
    let strip = Platform::from_size(Vec3::new(3.0, 0.5, 0.0), Vec3::new(2.0, 1.0, 10.0));
    let platforms = [base_platform(), strip];
    let tuning = Tuning::default();
    let right = held(|i| i.right = true);
    let mut player = player_at(Vec3::new(3.0, 1.0, 0.0));

    for _ in 0..50 {
        player = step(&player, &right, &platforms, &[], SPAWN, &tuning).player;
    }

    assert!(
        (player.position.x - 3.5).abs() < 1e-6,
        "Clamp should follow the strip, got x = {}",
        player.position.x
    );
}

// ---- Lateral movement ----

#[test]
fn test_left_200_times_clamps_at_platform_edge() {
    let platforms = [base_platform()];
    let tuning = Tuning::default();
    let left = held(|i| i.left = true);
    let mut player = player_at(SPAWN);

    for _ in 0..200 {
        player = step(&player, &left, &platforms, &[], SPAWN, &tuning).player;
    }

    assert!(
        (player.position.x + 4.5).abs() < 1e-6,
        "x should clamp at -4.5, got {}",
        player.position.x
    );
    assert_eq!(player.position.y, 1.0);
    assert!(player.position.y <= 1.0);
    assert_eq!(player.lives, STARTING_LIVES);
}

#[test]
fn test_grounded_lateral_moves_stay_inside_footprint() {
    let platforms = [base_platform()];
    let tuning = Tuning::default();
    let pattern = [
        held(|i| i.left = true),
        held(|i| i.forward = true),
        held(|i| {
            i.right = true;
            i.backward = true;
        }),
        held(|i| {
            i.left = true;
            i.forward = true;
        }),
        held(|i| i.backward = true),
        held(|i| {
            i.left = true;
            i.right = true;
        }),
    ];
    let mut player = player_at(SPAWN);

    for tick in 0..2_000 {
        let input = &pattern[(tick / 37) % pattern.len()];
        player = step(&player, input, &platforms, &[], SPAWN, &tuning).player;

        assert!(player.position.x >= -4.5 - 1e-6 && player.position.x <= 4.5 + 1e-6);
        assert!(player.position.z >= -4.5 - 1e-6 && player.position.z <= 4.5 + 1e-6);
        assert!(!player.airborne);
    }
}

#[test]
fn test_opposite_keys_cancel() {
    let platforms = [base_platform()];
    let input = held(|i| {
        i.left = true;
        i.right = true;
        i.forward = true;
        i.backward = true;
    });
    let player = player_at(Vec3::new(1.0, 1.0, 1.0));

    let outcome = step(&player, &input, &platforms, &[], SPAWN, &Tuning::default());

    assert_eq!(outcome.player.position, player.position);
}

#[test]
fn test_air_control_is_unclamped() {
    let input = held(|i| i.right = true);
    let player = player_at(Vec3::new(20.0, 10.0, 0.0));

    let outcome = step(&player, &input, &[], &[], SPAWN, &Tuning::default());

    assert!((outcome.player.position.x - 20.1).abs() < 1e-5);
}

// ---- Manual vertical movement ----

#[test]
fn test_up_raises_player_to_top_face_and_stops() {
    let platforms = [base_platform()];
    let tuning = Tuning::default();
    let up = held(|i| i.up = true);
    let mut player = player_at(SPAWN);

    for _ in 0..20 {
        player = step(&player, &up, &platforms, &[], SPAWN, &tuning).player;
    }

    assert!((player.position.y - 1.5).abs() < 1e-6);
    assert!(!player.airborne);
}

#[test]
fn test_down_sinks_to_half_embedded() {
    let platforms = [base_platform()];
    let tuning = Tuning::default();
    let down = held(|i| i.down = true);
    let mut player = player_at(SPAWN);

    for _ in 0..20 {
        player = step(&player, &down, &platforms, &[], SPAWN, &tuning).player;
    }

    assert!((player.position.y - 0.5).abs() < 1e-6);
}

// ---- Jumping ----

#[test]
fn test_jump_from_top_face_returns_to_rest() {
    let platforms = [base_platform()];
    let tuning = Tuning::default();
    let mut player = player_at(Vec3::new(0.0, 1.5, 0.0));

    let outcome = step(
        &player,
        &held(|i| i.jump = true),
        &platforms,
        &[],
        SPAWN,
        &tuning,
    );
    assert!(outcome.jumped);
    player = outcome.player;
    assert!(player.airborne);
    assert!((player.vertical_velocity - (JUMP_VELOCITY + GRAVITY)).abs() < 1e-6);

    let mut peak = player.position.y;
    for _ in 0..100 {
        player = step(&player, &InputFlags::default(), &platforms, &[], SPAWN, &tuning).player;
        peak = peak.max(player.position.y);
    }

    assert!(peak > 6.0, "Jump should clear several units, peaked at {peak}");
    assert_eq!(player.position.y, 1.5);
    assert!(!player.airborne);
    assert_eq!(player.vertical_velocity, 0.0);
}

#[test]
fn test_jump_ignored_while_airborne() {
    let mut player = player_at(Vec3::new(0.0, 5.0, 0.0));
    player.airborne = true;
    player.vertical_velocity = 0.1;

    let outcome = step(
        &player,
        &held(|i| i.jump = true),
        &[],
        &[],
        SPAWN,
        &Tuning::default(),
    );

    assert!(!outcome.jumped);
    assert!((outcome.player.vertical_velocity - (0.1 + GRAVITY)).abs() < 1e-6);
}

#[test]
fn test_rising_into_platform_bonks_and_stays_airborne() {
    // Ceiling y in [3.5, 4.5] above the base.
    let ceiling = Platform::from_size(Vec3::new(0.0, 4.0, 0.0), Vec3::new(4.0, 1.0, 4.0));
    let platforms = [base_platform(), ceiling];
    let tuning = Tuning::default();
    let mut player = player_at(Vec3::new(0.0, 1.5, 0.0));
    player = step(&player, &held(|i| i.jump = true), &platforms, &[], SPAWN, &tuning).player;

    let mut bonked = false;
    for _ in 0..10 {
        player = step(&player, &InputFlags::default(), &platforms, &[], SPAWN, &tuning).player;
        if player.vertical_velocity == 0.0 {
            bonked = true;
            break;
        }
    }

    assert!(bonked, "Should hit the ceiling within 10 ticks");
    assert_eq!(player.position.y, 3.0, "Snapped under the ceiling");
    assert!(player.airborne, "Bonking does not land");

    for _ in 0..60 {
        player = step(&player, &InputFlags::default(), &platforms, &[], SPAWN, &tuning).player;
    }
    assert_eq!(player.position.y, 1.5, "Falls back onto the base");
    assert!(!player.airborne);
}

#[test]
fn test_jump_while_embedded_hits_platform_underside() {
    // At spawn the cube sits half inside the base. Rising while still
    // overlapping it counts as hitting its underside.
    let platforms = [base_platform()];
    let outcome = step(
        &player_at(SPAWN),
        &held(|i| i.jump = true),
        &platforms,
        &[],
        SPAWN,
        &Tuning::default(),
    );

    assert!(outcome.jumped);
    assert_eq!(outcome.player.position.y, -0.5);
    assert_eq!(outcome.player.vertical_velocity, 0.0);
    assert!(outcome.player.airborne);
}

// ---- Fall-out ----

#[test]
fn test_fall_out_resets_to_spawn_once_below_limit() {
    let tuning = Tuning::default();
    let mut player = player_at(Vec3::ZERO);
    player.airborne = true;
    player.vertical_velocity = 0.5;

    let mut lost_at = None;
    for tick in 0..200 {
        let before = player;
        let outcome = step(&before, &InputFlags::default(), &[], &[], SPAWN, &tuning);
        player = outcome.player;
        if outcome.fall_out != FallOut::Safe {
            assert!(before.position.y >= FALL_OUT_Y, "Previous tick was still in bounds");
            let projected = before.position.y + (before.vertical_velocity + GRAVITY);
            assert!(projected < FALL_OUT_Y, "This tick crossed the limit");
            lost_at = Some(tick);
            break;
        }
    }

    assert!(lost_at.is_some(), "Player should have fallen out");
    assert_eq!(player.lives, STARTING_LIVES - 1);
    assert_eq!(player.position, SPAWN);
    assert_eq!(player.vertical_velocity, 0.0);
    assert!(!player.airborne);
}

#[test]
fn test_last_life_lost_resets_game() {
    let mut player = player_at(Vec3::new(20.0, -5.01, 20.0));
    player.lives = 1;
    player.score = 40;
    player.level = 2;

    let outcome = step(
        &player,
        &InputFlags::default(),
        &[base_platform()],
        &[],
        SPAWN,
        &Tuning::default(),
    );

    assert_eq!(outcome.fall_out, FallOut::GameOver);
    assert_eq!(outcome.transition, LevelTransition::ReloadCurrent);
    assert_eq!(outcome.player.lives, STARTING_LIVES);
    assert_eq!(outcome.player.score, 0);
    assert_eq!(outcome.player.level, FIRST_LEVEL);
    assert_eq!(outcome.player.position, SPAWN);
}

#[test]
fn test_fall_out_happens_before_coin_pickup() {
    // A coin right where the player falls through the limit is not collected.
    let mut player = player_at(Vec3::new(20.0, -4.99, 20.0));
    player.airborne = true;
    player.vertical_velocity = -0.1;
    let coins = [Coin::new(Vec3::new(20.0, -5.2, 20.0))];

    let outcome = step(
        &player,
        &InputFlags::default(),
        &[],
        &coins,
        SPAWN,
        &Tuning::default(),
    );

    assert_eq!(outcome.fall_out, FallOut::LifeLost);
    assert!(outcome.collected.is_empty());
    assert_eq!(outcome.player.score, 0);
}

// ---- Coins ----

#[test]
fn test_each_overlapping_coin_scores_ten() {
    let platforms = [base_platform()];
    let coins = [
        Coin::new(Vec3::new(0.2, 1.0, 0.0)),
        Coin::new(Vec3::new(-0.2, 1.2, 0.1)),
        Coin::new(Vec3::new(0.0, 1.0, -0.3)),
        Coin::new(Vec3::new(4.0, 1.0, 4.0)),
    ];
    let mut player = player_at(SPAWN);
    player.score = 20;

    let outcome = step(
        &player,
        &InputFlags::default(),
        &platforms,
        &coins,
        SPAWN,
        &Tuning::default(),
    );

    assert_eq!(outcome.collected, vec![0, 1, 2]);
    assert_eq!(outcome.player.score, 20 + 3 * COIN_VALUE);
    assert_eq!(outcome.transition, LevelTransition::None);
}

#[test]
fn test_collected_coins_are_ignored() {
    let mut coin = Coin::new(SPAWN);
    coin.collected = true;

    let outcome = step(
        &player_at(SPAWN),
        &InputFlags::default(),
        &[base_platform()],
        &[coin],
        SPAWN,
        &Tuning::default(),
    );

    assert!(outcome.collected.is_empty());
    assert_eq!(outcome.player.score, 0);
}

#[test]
fn test_last_coin_advances_exactly_once() {
    let platforms = [base_platform()];
    let tuning = Tuning::default();
    let player = player_at(SPAWN);
    let coins = [Coin::new(Vec3::new(0.0, 1.0, 0.0))];

    let first = step(&player, &InputFlags::default(), &platforms, &coins, SPAWN, &tuning);
    assert_eq!(first.collected, vec![0]);
    assert_eq!(first.transition, LevelTransition::AdvanceToNext);

    // The coin set is now empty; further ticks must not re-signal.
    let mut player = first.player;
    for _ in 0..10 {
        let outcome = step(&player, &InputFlags::default(), &platforms, &[], SPAWN, &tuning);
        assert_eq!(outcome.transition, LevelTransition::None);
        player = outcome.player;
    }

    let mut spent = coins;
    spent[0].collected = true;
    let outcome = step(&player, &InputFlags::default(), &platforms, &spent, SPAWN, &tuning);
    assert_eq!(outcome.transition, LevelTransition::None);
}

#[test]
fn test_last_coin_on_final_level_does_not_advance() {
    let mut player = player_at(SPAWN);
    player.level = FINAL_LEVEL;
    let coins = [Coin::new(SPAWN)];

    let outcome = step(
        &player,
        &InputFlags::default(),
        &[base_platform()],
        &coins,
        SPAWN,
        &Tuning::default(),
    );

    assert_eq!(outcome.collected, vec![0]);
    assert_eq!(outcome.transition, LevelTransition::None);
}

// ---- Level data ----

#[test]
fn test_authored_levels_validate() {
    let all = levels::all_levels();
    assert_eq!(all.len(), 2);
    for level in &all {
        assert_eq!(level.validate(), Ok(()));
        assert_eq!(level.platforms.len(), 6);
        assert_eq!(level.coins.len(), 5);
        assert_eq!(level.spawn, SPAWN);
    }
    assert_eq!(all[0].music, MusicTrack::DayOfJoy);
    assert_eq!(all[1].music, MusicTrack::CallOfTheSands);
}

#[test]
fn test_every_coin_rests_on_a_platform_top() {
    for level in levels::all_levels() {
        let platforms = level.build_platforms();
        for coin in &level.coins {
            let standing = player_at(*coin);
            let on_top = platforms.iter().any(|p| {
                let aabb = p.aabb();
                aabb.max.y == coin.y && standing.aabb().intersects(&aabb)
            });
            assert!(on_top, "Coin {coin:?} in level {} is unreachable", level.number);
        }
    }
}

#[test]
fn test_unknown_level() {
    assert_eq!(levels::level(3), Err(LevelError::Unknown(3)));
    assert_eq!(levels::level(0), Err(LevelError::Unknown(0)));
}

#[test]
fn test_validate_rejects_bad_data() {
    let mut level = levels::level(1).unwrap();
    level.platforms[2] = PlatformSpec::new(0.0, 0.0, 0.0, 0.0, 1.0, 1.0);
    assert_eq!(
        level.validate(),
        Err(LevelError::DegeneratePlatform { level: 1, index: 2 })
    );

    let mut level = levels::level(2).unwrap();
    level.spawn = Vec3::new(f32::NAN, 1.0, 0.0);
    assert_eq!(level.validate(), Err(LevelError::NonFinite { level: 2 }));

    let mut level = levels::level(2).unwrap();
    level.coins.clear();
    assert_eq!(level.validate(), Err(LevelError::NoCoins(2)));
}

// ---- Engine: phases ----

#[test]
fn test_title_screen_does_not_simulate() {
    let mut engine = SimulationEngine::new(SimConfig::default());

    for _ in 0..10 {
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::TitleScreen);
        assert!(snap.platforms.is_empty());
        assert!(snap.music.is_none());
    }
    assert_eq!(engine.time().tick, 0);
    assert_eq!(engine.world().len(), 0);
}

#[test]
fn test_start_game_loads_level_one() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(GameCommand::StartGame);
    let snap = engine.tick();

    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.level, 1);
    assert_eq!(snap.lives, STARTING_LIVES);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.platforms.len(), 6);
    assert_eq!(snap.coins.len(), 5);
    assert_eq!(snap.coins_remaining, 5);
    assert!(snap.events.contains(&GameEvent::LevelLoaded { level: 1 }));
    assert_eq!(snap.music.map(|m| m.track), Some(MusicTrack::DayOfJoy));
    assert_eq!(snap.player.position, SPAWN);
    assert_eq!(
        snap.camera.desired_position,
        SPAWN + Vec3::from_array(CAMERA_OFFSET)
    );

    // Starting again while playing is ignored.
    engine.queue_command(GameCommand::StartGame);
    let snap = engine.tick();
    assert!(snap.events.is_empty());
}

#[test]
fn test_invalid_starting_level_stays_on_title() {
    let mut engine = SimulationEngine::new(SimConfig {
        starting_level: 7,
        ..Default::default()
    });
    engine.queue_command(GameCommand::StartGame);
    let snap = engine.tick();

    assert_eq!(snap.phase, GamePhase::TitleScreen);
    assert_eq!(engine.world().len(), 0);
}

#[test]
fn test_pause_stops_simulation() {
    let mut engine = started_engine();
    engine.queue_command(GameCommand::SetInput {
        input: held(|i| i.left = true),
    });
    for _ in 0..5 {
        engine.tick();
    }
    let tick = engine.time().tick;
    let x = engine.player().position.x;

    engine.queue_command(GameCommand::Pause);
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.phase(), GamePhase::Paused);
    assert_eq!(engine.time().tick, tick);
    assert_eq!(engine.player().position.x, x);

    engine.queue_command(GameCommand::Resume);
    engine.tick();
    assert_eq!(engine.phase(), GamePhase::Playing);
    assert!(engine.player().position.x < x);
}

#[test]
fn test_return_to_title_clears_arena() {
    let mut engine = started_engine();
    engine.queue_command(GameCommand::ReturnToTitle);
    let snap = engine.tick();

    assert_eq!(snap.phase, GamePhase::TitleScreen);
    assert_eq!(engine.world().len(), 0);
    assert_eq!(engine.level_number(), None);

    engine.queue_command(GameCommand::StartGame);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.coins_remaining, 5);
}

#[test]
fn test_determinism_same_inputs() {
    let script = [
        GameCommand::StartGame,
        GameCommand::SetInput {
            input: held(|i| i.up = true),
        },
        GameCommand::SetInput {
            input: held(|i| {
                i.right = true;
                i.forward = true;
            }),
        },
        GameCommand::PressJump,
    ];

    let mut engine_a = SimulationEngine::new(SimConfig::default());
    let mut engine_b = SimulationEngine::new(SimConfig::default());

    for tick in 0..400 {
        if tick % 40 == 0 {
            let cmd = script[(tick / 40) % script.len()].clone();
            engine_a.queue_command(cmd.clone());
            engine_b.queue_command(cmd);
        }
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged at tick {tick}");
    }
}

// ---- Engine: input ----

#[test]
fn test_jump_latch_fires_once() {
    let mut engine = started_engine();
    // Clear of every raised platform, so the jump goes straight up and down.
    engine.teleport_player(Vec3::new(-2.0, 1.5, 2.0));

    engine.queue_command(GameCommand::PressJump);
    let snap = engine.tick();
    assert!(snap.player.airborne);

    // Land, then make sure no further jump happens without a new press.
    for _ in 0..80 {
        engine.tick();
    }
    let snap = engine.tick();
    assert!(!snap.player.airborne);
    assert_eq!(snap.player.position.y, 1.5);
}

#[test]
fn test_set_input_holds_keys() {
    let mut engine = started_engine();
    engine.queue_command(GameCommand::SetInput {
        input: held(|i| i.backward = true),
    });
    for _ in 0..10 {
        engine.tick();
    }
    assert!((engine.player().position.z - 1.0).abs() < 1e-5);

    engine.queue_command(GameCommand::SetInput {
        input: InputFlags::default(),
    });
    engine.tick();
    assert!((engine.player().position.z - 1.0).abs() < 1e-5);
}

// ---- Engine: coins and progression ----

#[test]
fn test_engine_collects_and_despawns_coin() {
    let mut engine = started_engine();
    engine.teleport_player(Vec3::new(5.0, 3.0, -5.0));
    let snap = engine.tick();

    assert_eq!(snap.score, COIN_VALUE);
    assert_eq!(snap.coins_remaining, 4);
    assert_eq!(live_coin_count(&engine), 4);
    let total_coins = engine.world().query::<&Coin>().iter().count();
    assert_eq!(total_coins, 4, "Collected coin should be despawned");
    assert!(snap.events.contains(&GameEvent::CoinCollected {
        position: Vec3::new(5.0, 3.0, -5.0),
        score: COIN_VALUE,
    }));
}

#[test]
fn test_collecting_level_one_advances_to_level_two() {
    let mut engine = started_engine();
    let coins = levels::level(1).unwrap().coins;

    let mut advanced = 0;
    let mut last = None;
    for coin in &coins {
        engine.teleport_player(*coin);
        let snap = engine.tick();
        advanced += snap
            .events
            .iter()
            .filter(|e| **e == GameEvent::LevelLoaded { level: 2 })
            .count();
        last = Some(snap);
    }
    let snap = last.unwrap();

    assert_eq!(advanced, 1);
    assert_eq!(snap.level, 2);
    assert_eq!(snap.score, 5 * COIN_VALUE);
    assert_eq!(snap.coins_remaining, 5);
    assert_eq!(snap.player.position, SPAWN);
    assert_eq!(snap.music.map(|m| m.track), Some(MusicTrack::CallOfTheSands));

    for _ in 0..30 {
        let snap = engine.tick();
        assert_eq!(snap.level, 2);
        assert!(snap.events.is_empty());
    }
}

#[test]
fn test_clearing_final_level_reports_once() {
    let mut engine = started_engine();
    engine.queue_command(GameCommand::SwitchLevel);
    engine.tick();
    assert_eq!(engine.level_number(), Some(2));

    let mut cleared_events = 0;
    for coin in levels::level(2).unwrap().coins {
        engine.teleport_player(coin);
        let snap = engine.tick();
        cleared_events += snap
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelCleared { .. }))
            .count();
    }
    for _ in 0..10 {
        let snap = engine.tick();
        assert!(snap.level_cleared);
        assert_eq!(snap.level, 2);
        cleared_events += snap.events.len();
    }

    assert_eq!(cleared_events, 1);
    assert_eq!(engine.player().score, 5 * COIN_VALUE);
}

#[test]
fn test_switch_level_toggles() {
    let mut engine = started_engine();

    engine.queue_command(GameCommand::SwitchLevel);
    let snap = engine.tick();
    assert_eq!(snap.level, 2);
    assert!(snap.events.contains(&GameEvent::LevelLoaded { level: 2 }));

    engine.queue_command(GameCommand::SwitchLevel);
    let snap = engine.tick();
    assert_eq!(snap.level, 1);
    assert_eq!(snap.coins_remaining, 5);
}

#[test]
fn test_arena_holds_exactly_one_level() {
    let mut engine = started_engine();
    engine.queue_command(GameCommand::SwitchLevel);
    engine.tick();

    let mut query = engine.world().query::<&LevelTag>();
    let tags: Vec<LevelTag> = query.iter().map(|(_, tag)| *tag).collect();
    assert_eq!(tags.len(), 11);
    assert!(tags.iter().all(|t| t.level == 2));
}

// ---- Engine: lives ----

#[test]
fn test_falling_off_costs_a_life() {
    let mut engine = started_engine();
    engine.teleport_player(Vec3::new(20.0, 0.0, 20.0));

    let mut lost = Vec::new();
    for _ in 0..40 {
        let snap = engine.tick();
        lost.extend(
            snap.events
                .into_iter()
                .filter(|e| matches!(e, GameEvent::LifeLost { .. })),
        );
    }

    assert_eq!(
        lost,
        vec![GameEvent::LifeLost {
            lives_remaining: STARTING_LIVES - 1
        }]
    );
    assert_eq!(engine.player().lives, STARTING_LIVES - 1);
    assert_eq!(engine.player().position, SPAWN);
}

#[test]
fn test_game_over_reloads_level_one() {
    let mut engine = started_engine();

    // Bank some score and move on to level 2 first.
    engine.teleport_player(Vec3::new(5.0, 3.0, -5.0));
    engine.tick();
    engine.queue_command(GameCommand::SwitchLevel);
    engine.tick();
    assert_eq!(engine.player().score, COIN_VALUE);
    assert_eq!(engine.level_number(), Some(2));

    let mut saw_game_over = false;
    let mut reloaded_one = false;
    for _ in 0..STARTING_LIVES {
        engine.teleport_player(Vec3::new(20.0, 0.0, 20.0));
        for _ in 0..40 {
            let snap = engine.tick();
            saw_game_over |= snap.events.contains(&GameEvent::GameOver);
            reloaded_one |= snap.events.contains(&GameEvent::LevelLoaded { level: 1 });
        }
    }

    assert!(saw_game_over);
    assert!(reloaded_one);
    assert_eq!(engine.player().lives, STARTING_LIVES);
    assert_eq!(engine.player().score, 0);
    assert_eq!(engine.level_number(), Some(1));
    assert_eq!(live_coin_count(&engine), 5);
}

#[test]
fn test_custom_tuning_starting_lives() {
    let mut engine = SimulationEngine::new(SimConfig {
        tuning: Tuning {
            starting_lives: 1,
            ..Default::default()
        },
        ..Default::default()
    });
    engine.queue_command(GameCommand::StartGame);
    engine.tick();
    assert_eq!(engine.player().lives, 1);

    engine.teleport_player(Vec3::new(20.0, 0.0, 20.0));
    let mut saw_game_over = false;
    for _ in 0..40 {
        saw_game_over |= engine.tick().events.contains(&GameEvent::GameOver);
    }
    assert!(saw_game_over);
    assert_eq!(engine.player().lives, 1);
}
