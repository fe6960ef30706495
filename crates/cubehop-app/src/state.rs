//! Application state shared between the frontend side and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use cubehop_core::commands::GameCommand;

use crate::config::AppConfig;
use crate::game_loop;
use crate::presenter::Frame;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A command to forward to the simulation engine.
    Command(GameCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Game loop already running")]
    AlreadyRunning,
    #[error("Game loop not started")]
    NotStarted,
    #[error("Game loop has stopped")]
    Disconnected,
    #[error("Failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("Shared state lock poisoned")]
    Poisoned,
}

/// Shared application state.
///
/// - `mpsc::Sender` sits behind a `Mutex` so the state is `Sync`
/// - the sender is `None` until `start` is called
/// - the latest frame is shared with the game loop thread
pub struct AppState {
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_frame: Arc<Mutex<Option<Frame>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_frame: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop thread.
    pub fn start(&self, config: AppConfig) -> Result<(), HostError> {
        let mut tx_lock = self.command_tx.lock().map_err(|_| HostError::Poisoned)?;
        if tx_lock.is_some() {
            return Err(HostError::AlreadyRunning);
        }

        let cmd_tx = game_loop::spawn_game_loop(config, self.latest_frame.clone())?;
        *tx_lock = Some(cmd_tx);
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.command_tx
            .lock()
            .map(|tx| tx.is_some())
            .unwrap_or(false)
    }

    /// Forward a command to the simulation.
    pub fn send_command(&self, command: GameCommand) -> Result<(), HostError> {
        self.send(GameLoopCommand::Command(command))
    }

    /// Ask the game loop to stop. The state can be started again afterwards.
    pub fn shutdown(&self) -> Result<(), HostError> {
        let result = self.send(GameLoopCommand::Shutdown);
        let mut tx_lock = self.command_tx.lock().map_err(|_| HostError::Poisoned)?;
        *tx_lock = None;
        result
    }

    /// Latest frame, for polling.
    pub fn latest_frame(&self) -> Result<Option<Frame>, HostError> {
        let lock = self.latest_frame.lock().map_err(|_| HostError::Poisoned)?;
        Ok(lock.clone())
    }

    fn send(&self, command: GameLoopCommand) -> Result<(), HostError> {
        let tx_lock = self.command_tx.lock().map_err(|_| HostError::Poisoned)?;
        match tx_lock.as_ref() {
            Some(tx) => tx.send(command).map_err(|_| HostError::Disconnected),
            None => Err(HostError::NotStarted),
        }
    }
}
