//! Level arena setup.
//!
//! Loading a level clears every entity and respawns the level's platforms
//! and coins in authoring order, inside one call. The step never sees a
//! half-loaded level.

use hecs::World;

use cubehop_core::components::{Coin, LevelTag, Platform};

use crate::levels::LevelDefinition;

/// Replace the arena's contents with `level`.
pub fn load_level(world: &mut World, level: &LevelDefinition) {
    world.clear();
    spawn_platforms(world, level);
    spawn_coins(world, level);
}

fn spawn_platforms(world: &mut World, level: &LevelDefinition) {
    for (index, platform) in level.build_platforms().into_iter().enumerate() {
        world.spawn((
            platform,
            LevelTag {
                level: level.number,
                index: index as u32,
            },
        ));
    }
}

fn spawn_coins(world: &mut World, level: &LevelDefinition) {
    for (index, coin) in level.build_coins().into_iter().enumerate() {
        world.spawn((
            coin,
            LevelTag {
                level: level.number,
                index: index as u32,
            },
        ));
    }
}

/// Live platforms in authoring order.
pub fn platforms(world: &World) -> Vec<Platform> {
    let mut tagged: Vec<(u32, Platform)> = world
        .query::<(&Platform, &LevelTag)>()
        .iter()
        .map(|(_, (platform, tag))| (tag.index, *platform))
        .collect();
    tagged.sort_by_key(|(index, _)| *index);
    tagged.into_iter().map(|(_, platform)| platform).collect()
}

/// Live coins in authoring order, with their entities.
pub fn coins(world: &World) -> Vec<(hecs::Entity, Coin)> {
    let mut tagged: Vec<(u32, hecs::Entity, Coin)> = world
        .query::<(&Coin, &LevelTag)>()
        .iter()
        .map(|(entity, (coin, tag))| (tag.index, entity, *coin))
        .collect();
    tagged.sort_by_key(|(index, _, _)| *index);
    tagged
        .into_iter()
        .map(|(_, entity, coin)| (entity, coin))
        .collect()
}
