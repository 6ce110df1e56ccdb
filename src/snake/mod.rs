//! Grid growth game ("Cosmic Snake")
//!
//! Fixed-period grid movement: the snake grows when it reaches the food
//! orb, dies on walls or itself, and speeds up as the score crosses the
//! level-table thresholds. The host reschedules its timer from the
//! `tick_ms` the snapshot reports.

mod state;
mod tick;

pub use state::{Config, GamePhase, GameState, LevelTier};
pub use tick::{Command, apply, tick};

use crate::session::Engine;

impl Engine for GameState {
    type Config = Config;
    type Command = Command;
    type Snapshot = GameState;

    fn init(config: Config, seed: u64) -> Self {
        GameState::new(config, seed)
    }

    fn apply(&mut self, cmd: Command) {
        tick::apply(self, cmd);
    }

    fn step(&mut self, _dt: f32) {
        tick::tick(self);
    }

    fn reset(&mut self) {
        *self = GameState::new(self.config.clone(), self.seed);
    }

    fn snapshot(&self) -> GameState {
        self.clone()
    }

    fn overlay_message(&self, player: &str) -> Option<String> {
        match self.phase {
            GamePhase::GameOver => Some(format!("{player}, the cosmos swallowed you!")),
            GamePhase::Playing => None,
        }
    }
}
