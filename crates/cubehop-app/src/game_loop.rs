//! Game loop thread: runs the simulation engine at the configured tick rate.
//!
//! The engine is created inside this thread and never leaves it. Commands
//! arrive via an `mpsc` channel; the latest presented frame is stored in
//! shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use cubehop_sim::SimulationEngine;

use crate::audio::MusicChange;
use crate::config::AppConfig;
use crate::presenter::{Frame, Presenter};
use crate::state::GameLoopCommand;

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the caller to use.
pub fn spawn_game_loop(
    config: AppConfig,
    latest_frame: Arc<Mutex<Option<Frame>>>,
) -> std::io::Result<mpsc::Sender<GameLoopCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("cubehop-game-loop".into())
        .spawn(move || {
            run_game_loop(&config, cmd_rx, &latest_frame);
        })?;

    Ok(cmd_tx)
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: &AppConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_frame: &Mutex<Option<Frame>>,
) {
    let mut engine = SimulationEngine::new(config.sim);
    let mut presenter = Presenter::new(config);
    let tick_duration = config.tick_duration();
    let mut next_tick_time = Instant::now();
    let mut last_hud = String::new();

    log::debug!("Game loop started at {} Hz", config.tick_rate);

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Command(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    log::debug!("Game loop stopped at tick {}", engine.time().tick);
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (the engine handles title/pause internally)
        let snapshot = engine.tick();

        // 3. Camera, HUD and music
        let (frame, music) = presenter.present(snapshot);
        if let Some(MusicChange::Play { path, volume, .. }) = &music {
            log::debug!("Music cue: {} at volume {volume}", path.display());
        }
        if frame.hud != last_hud {
            log::info!("{}", frame.hud);
            last_hud.clone_from(&frame.hud);
        }

        // 4. Store latest frame for polling
        if let Ok(mut lock) = latest_frame.lock() {
            *lock = Some(frame);
        }

        // 5. Sleep until next tick
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}
