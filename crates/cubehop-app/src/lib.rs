//! CUBEHOP headless host.
//!
//! Wires the simulation crates to a real-time game loop thread, a scripted
//! replay runner, and the presentation pieces a renderer would need
//! (follow camera, HUD line, music selection).

pub mod audio;
pub mod camera;
pub mod config;
pub mod game_loop;
pub mod hud;
pub mod presenter;
pub mod script;
pub mod state;

pub use cubehop_core as core;
