//! Fundamental geometric and simulation types.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Axis-aligned bounding box. Built fresh every tick from a position and
/// fixed half-extents; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centred on `center` extending `half_extents` along each axis.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Bounding box of the player cube at `position`.
    pub fn player(position: Vec3) -> Self {
        Self::from_center(position, Vec3::splat(PLAYER_HALF_EXTENT))
    }

    /// Inclusive overlap test: boxes that share a face intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

/// Keys held during one tick.
///
/// Opposite directions are not exclusive: both deltas apply and cancel out.
/// `jump` is edge-triggered by the engine and only starts a jump from the
/// ground.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFlags {
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    /// Toward -z.
    #[serde(default)]
    pub forward: bool,
    /// Toward +z.
    #[serde(default)]
    pub backward: bool,
    #[serde(default)]
    pub up: bool,
    #[serde(default)]
    pub down: bool,
    #[serde(default)]
    pub jump: bool,
}

impl InputFlags {
    /// Net lateral displacement on (x, z) for one tick.
    pub fn lateral_delta(&self, step: f32) -> (f32, f32) {
        let mut dx = 0.0;
        let mut dz = 0.0;
        if self.left {
            dx -= step;
        }
        if self.right {
            dx += step;
        }
        if self.forward {
            dz -= step;
        }
        if self.backward {
            dz += step;
        }
        (dx, dz)
    }

    /// Net manual vertical displacement for one tick.
    pub fn vertical_delta(&self, step: f32) -> f32 {
        let mut dy = 0.0;
        if self.up {
            dy += step;
        }
        if self.down {
            dy -= step;
        }
        dy
    }
}

/// Everything the simulation knows about the player between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: Vec3,
    pub vertical_velocity: f32,
    pub airborne: bool,
    pub lives: u32,
    pub score: u32,
    pub level: u32,
}

impl PlayerState {
    /// A fresh player standing at `spawn` on the first level.
    pub fn new(spawn: Vec3) -> Self {
        Self {
            position: spawn,
            vertical_velocity: 0.0,
            airborne: false,
            lives: STARTING_LIVES,
            score: 0,
            level: FIRST_LEVEL,
        }
    }

    /// Put the player back at `spawn` at rest, keeping lives and score.
    pub fn respawn(&mut self, spawn: Vec3) {
        self.position = spawn;
        self.vertical_velocity = 0.0;
        self.airborne = false;
    }

    /// Bounding box at the current position.
    pub fn aabb(&self) -> Aabb {
        Aabb::player(self.position)
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 1.0, 0.0))
    }
}

/// Per-tick tuning. Defaults reproduce the shipped game feel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub move_step: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
    pub fall_out_y: f32,
    pub starting_lives: u32,
    pub coin_value: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_step: MOVE_STEP,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            fall_out_y: FALL_OUT_Y,
            starting_lives: STARTING_LIVES,
            coin_value: COIN_VALUE,
        }
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds at the nominal rate.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the nominal tick rate.
    pub fn dt(&self) -> f64 {
        DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
