//! Simulation constants and tuning parameters.
//!
//! Step sizes are per tick, not per second. They were tuned against a
//! nominal 60 Hz cadence; running the engine faster or slower changes the
//! effective speed of the game.

/// Nominal tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the nominal rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Player ---

/// Half-extent of the player cube on every axis.
pub const PLAYER_HALF_EXTENT: f32 = 0.5;

/// Lateral and manual vertical displacement per tick while a key is held.
pub const MOVE_STEP: f32 = 0.1;

/// Vertical velocity change per tick.
pub const GRAVITY: f32 = -0.02;

/// Vertical velocity given by a jump.
pub const JUMP_VELOCITY: f32 = 0.5;

/// Height below which the player loses a life.
pub const FALL_OUT_Y: f32 = -5.0;

/// Lives at game start and after a game over.
pub const STARTING_LIVES: u32 = 3;

// --- Coins ---

/// Coin sphere radius, used as the half-extent of its bounding box.
pub const COIN_RADIUS: f32 = 0.3;

/// Score awarded per coin.
pub const COIN_VALUE: u32 = 10;

// --- Levels ---

/// Level loaded by `StartGame` and after a game over.
pub const FIRST_LEVEL: u32 = 1;

/// Last authored level. Clearing it ends progression.
pub const FINAL_LEVEL: u32 = 2;

// --- Presentation ---

/// Camera position relative to the player.
pub const CAMERA_OFFSET: [f32; 3] = [0.0, 5.0, 10.0];

/// Time for the follow camera to settle on its target (seconds).
pub const CAMERA_SMOOTHING_SECS: f32 = 0.5;

/// Background music volume (0.0 - 1.0).
pub const MUSIC_VOLUME: f32 = 0.5;
