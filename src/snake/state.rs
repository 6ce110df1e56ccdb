//! Growth-grid state and level table
//!
//! All state the host renders lives here; the live RNG is carried alongside
//! but never serialized.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::geom::Direction;

/// Default arena is a 20x20 cell grid
pub const GRID_SIZE: i32 = 20;
/// Tick period before any level threshold is reached
pub const INITIAL_TICK_MS: u32 = 200;

/// One row of the level table: reaching `score` retunes the tick period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTier {
    pub score: u32,
    pub tick_ms: u32,
    /// Cosmetic stage name shown by the host
    pub name: String,
}

/// Static configuration for the growth-grid engine
///
/// `levels` must be sorted by ascending score threshold; the highest
/// satisfied row wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub width: i32,
    pub height: i32,
    pub tick_ms: u32,
    /// Stage name before the first threshold
    pub base_name: String,
    pub levels: Vec<LevelTier>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: GRID_SIZE,
            height: GRID_SIZE,
            tick_ms: INITIAL_TICK_MS,
            base_name: "Neon Nebula".into(),
            levels: vec![
                LevelTier {
                    score: 10,
                    tick_ms: 150,
                    name: "Lava Planet".into(),
                },
                LevelTier {
                    score: 25,
                    tick_ms: 100,
                    name: "Meteor Belt".into(),
                },
                LevelTier {
                    score: 45,
                    tick_ms: 70,
                    name: "Alien Station".into(),
                },
                LevelTier {
                    score: 70,
                    tick_ms: 50,
                    name: "Black Hole".into(),
                },
            ],
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Playing,
    /// Terminal; cleared by `reset`
    GameOver,
}

/// Complete growth-grid state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: Config,
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    /// Segment cells, head first
    pub snake: Vec<IVec2>,
    pub food: IVec2,
    /// Direction applied on the last step
    pub dir: Direction,
    /// Latest accepted direction request, consumed next step
    pub pending_dir: Option<Direction>,
    pub score: u32,
    /// 1-based cosmetic level index
    pub level: u32,
    pub level_name: String,
    /// Current tick period; the host reschedules its timer from this
    pub tick_ms: u32,
    #[serde(skip, default = "detached_rng")]
    pub(crate) rng: Pcg32,
}

fn detached_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl GameState {
    /// Create a new run with the given seed
    pub fn new(config: Config, seed: u64) -> Self {
        let start = IVec2::new(config.width / 2, config.height / 2);
        let mut state = Self {
            seed,
            phase: GamePhase::Playing,
            snake: vec![start],
            food: IVec2::ZERO,
            dir: Direction::Right,
            pending_dir: None,
            score: 0,
            level: 1,
            level_name: config.base_name.clone(),
            tick_ms: config.tick_ms,
            rng: Pcg32::seed_from_u64(seed),
            config,
        };
        state.spawn_food();
        state
    }

    /// Place the food on a uniformly random free cell, retrying until one
    /// is found. A fully occupied board parks the food off-grid.
    pub(crate) fn spawn_food(&mut self) {
        let cells = (self.config.width * self.config.height) as usize;
        if self.snake.len() >= cells {
            self.food = IVec2::new(-1, -1);
            return;
        }
        loop {
            let p = IVec2::new(
                self.rng.random_range(0..self.config.width),
                self.rng.random_range(0..self.config.height),
            );
            if !self.snake.contains(&p) {
                self.food = p;
                return;
            }
        }
    }

    /// Re-evaluate the level table after a score change; the new tick
    /// period takes effect immediately.
    pub(crate) fn retune(&mut self) {
        let mut level = 1;
        let mut tick_ms = self.config.tick_ms;
        let mut name = self.config.base_name.clone();
        for (i, tier) in self.config.levels.iter().enumerate() {
            if self.score >= tier.score {
                level = i as u32 + 2;
                tick_ms = tier.tick_ms;
                name = tier.name.clone();
            }
        }
        if level != self.level {
            log::info!("snake stage {level} ({name}), tick {tick_ms} ms");
        }
        self.level = level;
        self.tick_ms = tick_ms;
        self.level_name = name;
    }
}
