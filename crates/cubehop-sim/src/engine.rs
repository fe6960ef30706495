//! Simulation engine — the core of the game.
//!
//! `SimulationEngine` owns the level arena (a hecs world of platforms and
//! coins), the player state and the game phase. It processes host commands,
//! runs one `step` per tick, applies the step's outcome and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use serde::{Deserialize, Serialize};

use cubehop_core::commands::GameCommand;
use cubehop_core::components::Coin;
use cubehop_core::constants::{FINAL_LEVEL, FIRST_LEVEL};
use cubehop_core::enums::{GamePhase, LevelTransition};
use cubehop_core::events::GameEvent;
use cubehop_core::state::GameStateSnapshot;
use cubehop_core::types::{InputFlags, PlayerState, SimTime, Tuning};

use crate::levels::{self, LevelDefinition, LevelError};
use crate::step::step;
use crate::systems;
use crate::systems::fall_out::FallOut;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Level loaded by `StartGame`.
    pub starting_level: u32,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            starting_level: FIRST_LEVEL,
            tuning: Tuning::default(),
        }
    }
}

/// The simulation engine. Owns the level arena and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    config: SimConfig,
    player: PlayerState,
    level: Option<LevelDefinition>,
    level_cleared: bool,
    held_input: InputFlags,
    jump_latched: bool,
    command_queue: VecDeque<GameCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine sitting on the title screen.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            config,
            player: PlayerState::default(),
            level: None,
            level_cleared: false,
            held_input: InputFlags::default(),
            jump_latched: false,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: GameCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = GameCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Playing {
            self.run_step();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.player,
            self.level.as_ref(),
            self.level_cleared,
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current player state.
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Number of the loaded level, if a game is in progress.
    pub fn level_number(&self) -> Option<u32> {
        self.level.as_ref().map(|l| l.number)
    }

    /// Get a read-only reference to the level arena.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Move the player directly (for tests).
    #[cfg(test)]
    pub fn teleport_player(&mut self, position: glam::Vec3) {
        self.player.position = position;
        self.player.vertical_velocity = 0.0;
        self.player.airborne = false;
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: GameCommand) {
        match command {
            GameCommand::StartGame => {
                if self.phase == GamePhase::TitleScreen {
                    self.start_game();
                }
            }
            GameCommand::SetInput { input } => {
                if input.jump && self.phase == GamePhase::Playing {
                    self.jump_latched = true;
                }
                self.held_input = InputFlags {
                    jump: false,
                    ..input
                };
            }
            GameCommand::PressJump => {
                if self.phase == GamePhase::Playing {
                    self.jump_latched = true;
                }
            }
            GameCommand::SwitchLevel => {
                if matches!(self.phase, GamePhase::Playing | GamePhase::Paused) {
                    let next = match self.level_number() {
                        Some(FIRST_LEVEL) => FINAL_LEVEL,
                        _ => FIRST_LEVEL,
                    };
                    if let Err(e) = self.load_level(next) {
                        log::warn!("Level switch rejected: {e}");
                    }
                }
            }
            GameCommand::Pause => {
                if self.phase == GamePhase::Playing {
                    self.phase = GamePhase::Paused;
                }
            }
            GameCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Playing;
                }
            }
            GameCommand::ReturnToTitle => {
                self.world.clear();
                self.level = None;
                self.level_cleared = false;
                self.held_input = InputFlags::default();
                self.jump_latched = false;
                self.phase = GamePhase::TitleScreen;
            }
        }
    }

    /// Fresh player on the configured starting level.
    fn start_game(&mut self) {
        self.player = PlayerState::new(glam::Vec3::ZERO);
        self.player.lives = self.config.tuning.starting_lives;

        match self.load_level(self.config.starting_level) {
            Ok(()) => {
                self.phase = GamePhase::Playing;
                self.time = SimTime::default();
                log::info!("Game started on level {}", self.config.starting_level);
            }
            Err(e) => log::warn!("Cannot start game: {e}"),
        }
    }

    /// Atomically replace the arena with level `number` and respawn the player.
    fn load_level(&mut self, number: u32) -> Result<(), LevelError> {
        let definition = levels::level(number)?;
        definition.validate()?;

        world_setup::load_level(&mut self.world, &definition);
        self.player.level = number;
        self.player.respawn(definition.spawn);
        self.level_cleared = false;
        self.events.push(GameEvent::LevelLoaded { level: number });
        log::debug!(
            "Loaded level {number}: {} platforms, {} coins",
            definition.platforms.len(),
            definition.coins.len()
        );

        self.level = Some(definition);
        Ok(())
    }

    /// Run one player step and apply its outcome to the arena.
    fn run_step(&mut self) {
        let Some(spawn) = self.level.as_ref().map(|l| l.spawn) else {
            return;
        };

        let input = InputFlags {
            jump: self.jump_latched,
            ..self.held_input
        };
        self.jump_latched = false;

        // 1. Gather the live arena in authoring order
        let platforms = world_setup::platforms(&self.world);
        let coin_entities = world_setup::coins(&self.world);
        let coins: Vec<_> = coin_entities.iter().map(|(_, coin)| *coin).collect();

        // 2. Step the player
        let outcome = step(
            &self.player,
            &input,
            &platforms,
            &coins,
            spawn,
            &self.config.tuning,
        );
        self.player = outcome.player;

        // 3. Fall-out feedback
        match outcome.fall_out {
            FallOut::Safe => {}
            FallOut::LifeLost => {
                log::info!("Life lost, {} remaining", self.player.lives);
                self.events.push(GameEvent::LifeLost {
                    lives_remaining: self.player.lives,
                });
            }
            FallOut::GameOver => {
                log::info!("Game over, restarting from level {FIRST_LEVEL}");
                self.events.push(GameEvent::LifeLost { lives_remaining: 0 });
                self.events.push(GameEvent::GameOver);
            }
        }

        // 4. Flag collected coins, then despawn them
        for &index in &outcome.collected {
            let (entity, coin) = coin_entities[index];
            if let Ok(mut live) = self.world.get::<&mut Coin>(entity) {
                live.collected = true;
            }
            self.events.push(GameEvent::CoinCollected {
                position: coin.position,
                score: self.player.score,
            });
        }
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        // 5. Level transitions
        let transition = match outcome.transition {
            LevelTransition::None => None,
            LevelTransition::ReloadCurrent => Some(self.player.level),
            LevelTransition::AdvanceToNext => Some(self.player.level + 1),
        };
        if let Some(number) = transition {
            if let Err(e) = self.load_level(number) {
                log::warn!("Level transition {:?} failed: {e}", outcome.transition);
            }
        }

        // 6. Final level cleared
        self.check_level_cleared();
    }

    fn check_level_cleared(&mut self) {
        if self.level_cleared || self.player.level != FINAL_LEVEL {
            return;
        }
        let live_coins = {
            let mut query = self.world.query::<&Coin>();
            query.iter().filter(|(_, coin)| !coin.collected).count()
        };
        if live_coins == 0 {
            self.level_cleared = true;
            self.events.push(GameEvent::LevelCleared {
                level: self.player.level,
            });
            log::info!(
                "Level {} cleared with score {}",
                self.player.level,
                self.player.score
            );
        }
    }
}
