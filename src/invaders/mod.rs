//! Enemy-formation shooter ("Rock Invaders")
//!
//! Continuous-space ship versus a rigid enemy block that sweeps, bounces
//! off the side margins, and descends. Driven by real elapsed time from
//! the host's animation callback rather than a fixed period.

mod state;
mod tick;

pub use state::{
    ARENA_HEIGHT, ARENA_WIDTH, Bullet, Config, DOUBLE_SHOT_SECS, ENEMY_COLS, ENEMY_ROWS,
    ENEMY_SIZE, Enemy, FIRE_COOLDOWN_SECS, FORMATION_MARGIN, Formation, GamePhase, GameState,
    INITIAL_LIVES, INVULNERABILITY_SECS, LEVEL_UP_SECS, LevelStyle, Particle, PowerUp, PowerUpKind,
    ShipStatus, default_styles,
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
            GamePhase::LevelUp => Some(format!("Level {}", self.level + 1)),
            GamePhase::GameOver => Some(format!("{player}, the aliens silenced the stage!")),
        }
    }
}
