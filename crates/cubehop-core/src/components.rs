//! ECS components for hecs entities.
//!
//! A level is an arena of platform and coin entities. Components are plain
//! data; the only behaviour here is deriving their bounding boxes.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::COIN_RADIUS;
use crate::types::Aabb;

/// A static box the player can stand on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Centre of the box.
    pub position: Vec3,
    pub half_extents: Vec3,
}

impl Platform {
    /// Build from a centre and full width/height/depth.
    pub fn from_size(position: Vec3, size: Vec3) -> Self {
        Self {
            position,
            half_extents: size * 0.5,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.position, self.half_extents)
    }
}

/// A collectible coin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub position: Vec3,
    /// Set the tick the player touches it; cleanup despawns it afterwards.
    pub collected: bool,
}

impl Coin {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            collected: false,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.position, Vec3::splat(COIN_RADIUS))
    }
}

/// Which level spawned an entity, and its position in that level's
/// definition. Systems sort by `index` so iteration follows authoring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTag {
    pub level: u32,
    pub index: u32,
}
