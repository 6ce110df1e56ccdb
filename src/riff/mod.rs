//! Four-lane rhythm stage ("Cosmic Riff")
//!
//! Notes fall down colored lanes toward a strike zone; presses are graded
//! by distance, feeding a streak multiplier and a crowd meter that ends
//! the set when it empties.

mod state;
mod tick;

pub use state::{
    Config, FIELD_HEIGHT, FIELD_WIDTH, GOOD_WINDOW, GamePhase, GameState, HIT_WINDOW,
    HIT_ZONE_HEIGHT, HIT_ZONE_TOP, LANE_COLORS, LANE_COUNT, MAX_HEALTH, NOTE_RADIUS, Note,
    PERFECT_WINDOW, Particle,
};
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

    fn step(&mut self, dt: f32) {
        tick::tick(self, dt);
    }

    fn reset(&mut self) {
        *self = GameState::new(self.config.clone(), self.seed);
    }

    fn snapshot(&self) -> GameState {
        self.clone()
    }

    fn overlay_message(&self, player: &str) -> Option<String> {
        match self.phase {
            GamePhase::Playing => None,
            GamePhase::GameOver => Some(format!("{player}, the crowd lost heart!")),
        }
    }
}
