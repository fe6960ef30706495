//! Snapshot system: reads the arena and player and builds a GameStateSnapshot.
//!
//! Read-only: it never modifies the world.

use glam::Vec3;
use hecs::World;

use cubehop_core::components::{Coin, LevelTag, Platform};
use cubehop_core::constants::{CAMERA_OFFSET, MUSIC_VOLUME};
use cubehop_core::enums::GamePhase;
use cubehop_core::events::GameEvent;
use cubehop_core::state::*;
use cubehop_core::types::{PlayerState, SimTime};

use crate::levels::LevelDefinition;

/// Build a complete GameStateSnapshot from the current engine state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    player: &PlayerState,
    level: Option<&LevelDefinition>,
    level_cleared: bool,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    let coins = build_coins(world);

    GameStateSnapshot {
        time: *time,
        phase,
        level: level.map(|l| l.number).unwrap_or(0),
        lives: player.lives,
        score: player.score,
        player: PlayerView {
            position: player.position,
            vertical_velocity: player.vertical_velocity,
            airborne: player.airborne,
        },
        camera: build_camera(player),
        platforms: build_platforms(world),
        coins_remaining: coins.len() as u32,
        coins,
        level_cleared,
        music: level.map(|l| MusicCue {
            track: l.music,
            looping: true,
            volume: MUSIC_VOLUME,
        }),
        events,
    }
}

fn build_camera(player: &PlayerState) -> CameraView {
    CameraView {
        target: player.position,
        desired_position: player.position + Vec3::from_array(CAMERA_OFFSET),
    }
}

fn build_platforms(world: &World) -> Vec<PlatformView> {
    let mut platforms: Vec<(u32, PlatformView)> = world
        .query::<(&Platform, &LevelTag)>()
        .iter()
        .map(|(_, (platform, tag))| {
            (
                tag.index,
                PlatformView {
                    position: platform.position,
                    size: platform.half_extents * 2.0,
                },
            )
        })
        .collect();

    platforms.sort_by_key(|(index, _)| *index);
    platforms.into_iter().map(|(_, view)| view).collect()
}

/// Live (uncollected) coins only.
fn build_coins(world: &World) -> Vec<CoinView> {
    let mut coins: Vec<(u32, CoinView)> = world
        .query::<(&Coin, &LevelTag)>()
        .iter()
        .filter(|(_, (coin, _))| !coin.collected)
        .map(|(_, (coin, tag))| {
            (
                tag.index,
                CoinView {
                    position: coin.position,
                },
            )
        })
        .collect();

    coins.sort_by_key(|(index, _)| *index);
    coins.into_iter().map(|(_, view)| view).collect()
}
