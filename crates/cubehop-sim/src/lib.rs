//! Simulation engine for CUBEHOP.
//!
//! Owns the level arena, runs the player step at a fixed tick rate,
//! and produces GameStateSnapshots for the host.

pub mod engine;
pub mod levels;
pub mod step;
pub mod systems;
pub mod world_setup;

pub use cubehop_core as core;
pub use engine::{SimConfig, SimulationEngine};
pub use step::{step, StepOutcome};

#[cfg(test)]
mod tests;
