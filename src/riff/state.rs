//! Rhythm-stage state: lanes, falling notes, streak meter
//!
//! Runs on real elapsed time like the shooter; speeds are pixels per
//! second, timers seconds.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Playfield dimensions in pixels
pub const FIELD_WIDTH: f32 = 400.0;
pub const FIELD_HEIGHT: f32 = 600.0;
pub const LANE_COUNT: usize = 4;

/// The strike zone sits near the bottom of the field
pub const HIT_ZONE_TOP: f32 = FIELD_HEIGHT - 100.0;
pub const HIT_ZONE_HEIGHT: f32 = 40.0;

pub const NOTE_RADIUS: f32 = 25.0;
pub const NOTE_SPEED: f32 = 360.0;
/// Extra fall speed while the streak runs past 20
pub const STREAK_BONUS_SPEED: f32 = 120.0;
/// Notes spawn just above the field and are culled just below it
pub const NOTE_SPAWN_Y: f32 = -50.0;
pub const NOTE_CULL_MARGIN: f32 = 50.0;

/// Strike tolerance around the hit-zone center, and the grading bands
pub const HIT_WINDOW: f32 = 50.0;
pub const PERFECT_WINDOW: f32 = 15.0;
pub const GOOD_WINDOW: f32 = 35.0;

pub const MAX_HEALTH: i32 = 100;

/// Classic four-lane palette (green, red, yellow, blue)
pub const LANE_COLORS: [&str; 4] = ["#22c55e", "#ef4444", "#eab308", "#3b82f6"];

/// Static configuration for the rhythm stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub width: f32,
    pub height: f32,
    pub lanes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            lanes: LANE_COUNT,
        }
    }
}

/// One falling note
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: u32,
    pub lane: usize,
    pub y: f32,
    /// Crossed the bottom unstruck; inert but still rendered falling out
    pub missed: bool,
}

/// Decorative hit spark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub color: String,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Playing,
    /// Terminal; cleared by `reset`
    GameOver,
}

/// Complete rhythm-stage state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: Config,
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub notes: Vec<Note>,
    /// Visual only
    pub particles: Vec<Particle>,
    pub score: u32,
    /// Consecutive successful strikes
    pub streak: u32,
    /// Score multiplier, `streak / 10 + 1`
    pub multiplier: u32,
    /// Crowd meter in [0, 100]; zero ends the set
    pub health: i32,
    /// Elapsed play time in seconds; drives the spawn intensity wave
    pub time_secs: f32,
    /// Seconds since the last note spawned
    pub spawn_elapsed: f32,
    /// Interval the next spawn is waiting for
    pub next_spawn_secs: f32,
    pub(crate) next_id: u32,
    #[serde(skip, default = "detached_rng")]
    pub(crate) rng: Pcg32,
}

fn detached_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl GameState {
    /// Create a new set with the given seed
    pub fn new(config: Config, seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Playing,
            notes: Vec::new(),
            particles: Vec::new(),
            score: 0,
            streak: 0,
            multiplier: 1,
            health: MAX_HEALTH,
            time_secs: 0.0,
            spawn_elapsed: 0.0,
            next_spawn_secs: 1.0,
            next_id: 1,
            rng: Pcg32::seed_from_u64(seed),
            config,
        }
    }

    /// Vertical center of the strike zone
    pub fn hit_center(&self) -> f32 {
        HIT_ZONE_TOP + HIT_ZONE_HEIGHT / 2.0
    }

    /// Horizontal center of a lane
    pub fn lane_center(&self, lane: usize) -> f32 {
        let lane_width = self.config.width / self.config.lanes as f32;
        lane as f32 * lane_width + lane_width / 2.0
    }
}
