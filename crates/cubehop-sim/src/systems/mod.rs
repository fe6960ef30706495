//! Per-tick systems.
//!
//! The player systems (`support` through `coins`) are pure functions over
//! plain data, ordered by `crate::step`. `cleanup` and `snapshot` operate on
//! the level arena (`&mut World` / `&World`).

pub mod cleanup;
pub mod coins;
pub mod fall_out;
pub mod gravity;
pub mod movement;
pub mod snapshot;
pub mod support;
