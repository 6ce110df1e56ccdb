//! Formation shooter state: ship, enemy grid, projectiles, power-ups
//!
//! Unlike the grid games this engine runs on real elapsed time, so every
//! speed is in pixels per second and every timer in seconds.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::geom::Rect;

/// Playfield dimensions in pixels
pub const ARENA_WIDTH: f32 = 480.0;
pub const ARENA_HEIGHT: f32 = 560.0;
pub const INITIAL_LIVES: u32 = 3;

/// Player ship
pub const SHIP_WIDTH: f32 = 32.0;
pub const SHIP_HEIGHT: f32 = 20.0;
pub const SHIP_SPEED: f32 = 300.0;
pub const INVULNERABILITY_SECS: f32 = 2.0;

/// Bullets travel straight up
pub const BULLET_WIDTH: f32 = 4.0;
pub const BULLET_HEIGHT: f32 = 12.0;
pub const BULLET_SPEED: f32 = 420.0;
pub const FIRE_COOLDOWN_SECS: f32 = 0.35;

/// Enemy formation
pub const ENEMY_COLS: usize = 8;
pub const ENEMY_ROWS: usize = 4;
pub const ENEMY_SIZE: f32 = 28.0;
pub const ENEMY_GAP: f32 = 12.0;
/// Sweep speed before the level modifier
pub const FORMATION_BASE_SPEED: f32 = 30.0;
/// The formation bounces off this margin on both sides
pub const FORMATION_MARGIN: f32 = 10.0;
pub const FORMATION_TOP: f32 = 60.0;

/// Power-ups fall straight down
pub const POWERUP_SIZE: f32 = 20.0;
pub const POWERUP_SPEED: f32 = 120.0;
pub const POWERUP_SPAWN_CHANCE: f64 = 0.15;
pub const DOUBLE_SHOT_SECS: f32 = 10.0;

/// How long the level-up banner holds before the next wave
pub const LEVEL_UP_SECS: f32 = 2.0;

/// Decorative explosion particles
pub const PARTICLE_COUNT: usize = 20;
pub const PARTICLE_LIFESPAN_SECS: f32 = 0.5;
pub const MAX_PARTICLES: usize = 256;

pub const SHIELD_COLOR: &str = "#67e8f9";
pub const HIT_COLOR: &str = "#ffffff";

/// Cosmetic palette and pacing for one level of the cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelStyle {
    pub name: String,
    pub player_color: String,
    pub bullet_color: String,
    pub enemy_colors: Vec<String>,
    pub speed_modifier: f32,
}

fn style(
    name: &str,
    player_color: &str,
    bullet_color: &str,
    enemy_colors: [&str; 2],
    speed_modifier: f32,
) -> LevelStyle {
    LevelStyle {
        name: name.into(),
        player_color: player_color.into(),
        bullet_color: bullet_color.into(),
        enemy_colors: enemy_colors.iter().map(|c| c.to_string()).collect(),
        speed_modifier,
    }
}

/// The five-stage tour the waves cycle through
pub fn default_styles() -> Vec<LevelStyle> {
    vec![
        style("Stellar Debut", "#c0c0c0", "#ffffff", ["#ff00ff", "#00ffff"], 1.0),
        style("Lunar Stage", "#c0c0c0", "#d8b4fe", ["#a78bfa", "#c4b5fd"], 1.2),
        style("Solar Tour", "#facc15", "#fb923c", ["#f97316", "#f59e0b"], 1.5),
        style("Alien Ritual", "#86efac", "#4ade80", ["#34d399", "#10b981"], 1.8),
        style("Silence of the Void", "#e879f9", "#f472b6", ["#c026d3", "#be185d"], 2.2),
    ]
}

/// Static configuration for the formation shooter
///
/// `styles` must be non-empty; past its end the cycle repeats with the
/// speed modifier extrapolated upward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub width: f32,
    pub height: f32,
    pub lives: u32,
    pub styles: Vec<LevelStyle>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            lives: INITIAL_LIVES,
            styles: default_styles(),
        }
    }
}

/// One formation member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    /// Index into the level style's enemy palette
    pub color: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    /// Timed buff, refreshed on pickup
    DoubleShot,
    /// Persistent flag consumed by the next hit
    Shield,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub rect: Rect,
    pub kind: PowerUpKind,
}

/// Decorative spark; carries no gameplay state beyond eventual removal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub alpha: f32,
    pub color: String,
}

/// Shared travel state of the rigid enemy block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formation {
    /// +1 sweeping right, -1 sweeping left
    pub dir: f32,
    /// Pixels per second at the current level
    pub speed: f32,
}

/// Player status flags and timers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipStatus {
    pub double_shot_secs: f32,
    pub shield: bool,
    pub invulnerable_secs: f32,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Playing,
    /// Banner pause between cleared wave and next formation
    LevelUp,
    /// Terminal; cleared by `reset`
    GameOver,
}

/// Complete formation-shooter state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: Config,
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub ship: Rect,
    pub move_left: bool,
    pub move_right: bool,
    pub firing: bool,
    /// Seconds until the next volley may fire
    pub fire_cooldown: f32,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub formation: Formation,
    pub powerups: Vec<PowerUp>,
    /// Visual only
    pub particles: Vec<Particle>,
    pub status: ShipStatus,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    /// Style in effect for the current level
    pub style: LevelStyle,
    /// Remaining banner time while in `LevelUp`
    pub level_up_secs: f32,
    /// Tick counter; feeds the decorative particle hash
    pub time_ticks: u64,
    #[serde(skip, default = "detached_rng")]
    pub(crate) rng: Pcg32,
}

fn detached_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl GameState {
    /// Create a new run with the given seed
    pub fn new(config: Config, seed: u64) -> Self {
        let ship = Rect::new(
            (config.width - SHIP_WIDTH) / 2.0,
            config.height - SHIP_HEIGHT - 20.0,
            SHIP_WIDTH,
            SHIP_HEIGHT,
        );
        let mut state = Self {
            seed,
            phase: GamePhase::Playing,
            ship,
            move_left: false,
            move_right: false,
            firing: false,
            fire_cooldown: 0.0,
            bullets: Vec::new(),
            enemies: Vec::new(),
            formation: Formation {
                dir: 1.0,
                speed: FORMATION_BASE_SPEED,
            },
            powerups: Vec::new(),
            particles: Vec::new(),
            status: ShipStatus::default(),
            score: 0,
            lives: config.lives,
            level: 1,
            style: config.styles[0].clone(),
            level_up_secs: 0.0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            config,
        };
        state.setup_level(1);
        state
    }

    /// Style for a given level: cyclic through the table, speed modifier
    /// extrapolated linearly once past its end
    pub fn style_for(&self, level: u32) -> LevelStyle {
        let styles = &self.config.styles;
        let idx = (level as usize - 1) % styles.len();
        let mut style = styles[idx].clone();
        if level as usize > styles.len() {
            style.speed_modifier += (level as usize - styles.len()) as f32 * 0.25;
        }
        style
    }

    /// Spawn the formation for `level` and clear transient entities.
    /// Ship position and power-up status carry over between waves.
    pub(crate) fn setup_level(&mut self, level: u32) {
        let style = self.style_for(level);
        self.bullets.clear();
        self.powerups.clear();
        self.particles.clear();
        self.enemies.clear();

        let grid_w = ENEMY_COLS as f32 * ENEMY_SIZE + (ENEMY_COLS - 1) as f32 * ENEMY_GAP;
        let start_x = (self.config.width - grid_w) / 2.0;
        for row in 0..ENEMY_ROWS {
            for col in 0..ENEMY_COLS {
                self.enemies.push(Enemy {
                    rect: Rect::new(
                        start_x + col as f32 * (ENEMY_SIZE + ENEMY_GAP),
                        FORMATION_TOP + row as f32 * (ENEMY_SIZE + ENEMY_GAP),
                        ENEMY_SIZE,
                        ENEMY_SIZE,
                    ),
                    color: row % style.enemy_colors.len(),
                });
            }
        }
        self.formation = Formation {
            dir: 1.0,
            speed: FORMATION_BASE_SPEED * style.speed_modifier,
        };
        log::info!(
            "invaders wave {} ({}), formation speed {:.0} px/s",
            level,
            style.name,
            self.formation.speed
        );
        self.style = style;
    }
}
