//! Bomb arena state: grid, agents, bombs, explosions
//!
//! The arena is a bordered grid of floor, indestructible walls, and crates.
//! Walls never change; a crate becomes floor exactly once, when a blast
//! reaches it.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Arena dimensions in cells
pub const GRID_WIDTH: i32 = 13;
pub const GRID_HEIGHT: i32 = 11;
/// Fixed simulation period
pub const TICK_MS: u32 = 100;
/// Bomb fuse length
pub const BOMB_TIMER_MS: i32 = 2500;
/// How long a blast cell stays lethal
pub const EXPLOSION_MS: i32 = 500;
/// Blast reach in cells, in each of the four directions
pub const BLAST_RANGE: i32 = 2;
pub const INITIAL_LIVES: u32 = 3;
/// Chance that an interior cell starts as a crate
pub const CRATE_DENSITY: f64 = 0.85;
/// Pause between a round ending and the next arena appearing
pub const ROUND_RESTART_MS: u32 = 2000;

/// One arena cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    Empty,
    /// Indestructible
    Wall,
    /// Destructible; absorbs a blast and becomes empty
    Crate,
}

/// Which agent owns a bomb or a blast cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    Player,
    Ai,
}

/// An armed bomb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bomb {
    pub pos: IVec2,
    pub timer_ms: i32,
    pub owner: Owner,
}

/// One lethal blast cell; self-expires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: IVec2,
    pub timer_ms: i32,
    pub owner: Owner,
}

/// Round/match phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Playing,
    /// Waiting out the restart delay before the next round
    RoundWon,
    /// Waiting out the restart delay before the next round
    RoundLost,
    /// Terminal; cleared by `reset`
    MatchOver,
}

/// Static configuration for the bomb arena
///
/// Dimensions must leave room for the border and both spawn clearings
/// (at least 7x7).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub width: i32,
    pub height: i32,
    pub lives: u32,
    pub crate_density: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            lives: INITIAL_LIVES,
            crate_density: CRATE_DENSITY,
        }
    }
}

/// The destructible playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    pub width: i32,
    pub height: i32,
    cells: Vec<Cell>,
}

impl Arena {
    /// Generate a fresh arena: indestructible border and pillar lattice
    /// (both-even coordinates), crates elsewhere with `crate_density`, and
    /// a clearing carved around each agent's spawn corner.
    pub fn generate(width: i32, height: i32, crate_density: f64, rng: &mut Pcg32) -> Self {
        let mut arena = Self {
            width,
            height,
            cells: vec![Cell::Empty; (width * height) as usize],
        };
        for y in 0..height {
            for x in 0..width {
                let border = y == 0 || y == height - 1 || x == 0 || x == width - 1;
                let cell = if border || (x % 2 == 0 && y % 2 == 0) {
                    Cell::Wall
                } else if rng.random_bool(crate_density) {
                    Cell::Crate
                } else {
                    Cell::Empty
                };
                arena.set(IVec2::new(x, y), cell);
            }
        }
        // Spawn clearings in opposite corners
        for p in [IVec2::new(1, 1), IVec2::new(2, 1), IVec2::new(1, 2)] {
            arena.set(p, Cell::Empty);
        }
        for p in [
            IVec2::new(width - 2, height - 2),
            IVec2::new(width - 3, height - 2),
            IVec2::new(width - 2, height - 3),
        ] {
            arena.set(p, Cell::Empty);
        }
        arena
    }

    /// Cell at `p`, or `None` out of range (treated as blocked by callers)
    pub fn get(&self, p: IVec2) -> Option<Cell> {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return None;
        }
        Some(self.cells[(p.y * self.width + p.x) as usize])
    }

    pub fn set(&mut self, p: IVec2, cell: Cell) {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return;
        }
        self.cells[(p.y * self.width + p.x) as usize] = cell;
    }

    /// Number of cells of the given kind
    pub fn count(&self, kind: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == kind).count()
    }
}

/// Complete bomb-arena state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: Config,
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub arena: Arena,
    pub player: IVec2,
    pub ai: IVec2,
    pub bombs: Vec<Bomb>,
    pub explosions: Vec<Explosion>,
    pub lives: u32,
    pub score: u32,
    /// 1-based round counter; feeds the AI cadence and the round bonus
    pub level: u32,
    /// Milliseconds until the AI reconsiders its move
    pub ai_move_cooldown_ms: i32,
    /// Milliseconds until the AI may drop another bomb
    pub ai_bomb_cooldown_ms: i32,
    /// Countdown to the next round while in `RoundWon`/`RoundLost`
    pub restart_ms: u32,
    #[serde(skip, default = "detached_rng")]
    pub(crate) rng: Pcg32,
}

fn detached_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl GameState {
    /// Create a new match with the given seed
    pub fn new(config: Config, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let arena = Arena::generate(config.width, config.height, config.crate_density, &mut rng);
        Self {
            phase: GamePhase::Playing,
            player: IVec2::new(1, 1),
            ai: IVec2::new(config.width - 2, config.height - 2),
            bombs: Vec::new(),
            explosions: Vec::new(),
            lives: config.lives,
            score: 0,
            level: 1,
            ai_move_cooldown_ms: 0,
            ai_bomb_cooldown_ms: 0,
            restart_ms: 0,
            seed,
            arena,
            rng,
            config,
        }
    }

    /// Begin the next round: fresh arena, agents back in their corners,
    /// no bombs or explosions. Score, level, and lives carry over.
    pub(crate) fn start_round(&mut self) {
        self.arena = Arena::generate(
            self.config.width,
            self.config.height,
            self.config.crate_density,
            &mut self.rng,
        );
        self.player = IVec2::new(1, 1);
        self.ai = IVec2::new(self.config.width - 2, self.config.height - 2);
        self.bombs.clear();
        self.explosions.clear();
        self.ai_move_cooldown_ms = 0;
        self.ai_bomb_cooldown_ms = 0;
        self.restart_ms = 0;
        self.phase = GamePhase::Playing;
    }

    /// True when an agent may step onto `p`: an empty cell with no bomb
    pub fn valid_move(&self, p: IVec2) -> bool {
        self.arena.get(p) == Some(Cell::Empty) && !self.bombs.iter().any(|b| b.pos == p)
    }

    /// True when `owner` already has a bomb armed at `p`
    pub fn bomb_at(&self, p: IVec2, owner: Owner) -> bool {
        self.bombs.iter().any(|b| b.owner == owner && b.pos == p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena(seed: u64) -> Arena {
        let mut rng = Pcg32::seed_from_u64(seed);
        Arena::generate(GRID_WIDTH, GRID_HEIGHT, CRATE_DENSITY, &mut rng)
    }

    #[test]
    fn test_border_and_lattice_are_walls() {
        let arena = arena(3);
        for x in 0..GRID_WIDTH {
            assert_eq!(arena.get(IVec2::new(x, 0)), Some(Cell::Wall));
            assert_eq!(arena.get(IVec2::new(x, GRID_HEIGHT - 1)), Some(Cell::Wall));
        }
        for y in 0..GRID_HEIGHT {
            assert_eq!(arena.get(IVec2::new(0, y)), Some(Cell::Wall));
            assert_eq!(arena.get(IVec2::new(GRID_WIDTH - 1, y)), Some(Cell::Wall));
        }
        assert_eq!(arena.get(IVec2::new(2, 2)), Some(Cell::Wall));
        assert_eq!(arena.get(IVec2::new(4, 6)), Some(Cell::Wall));
    }

    #[test]
    fn test_spawn_clearings_are_empty() {
        for seed in 0..20 {
            let arena = arena(seed);
            for p in [IVec2::new(1, 1), IVec2::new(2, 1), IVec2::new(1, 2)] {
                assert_eq!(arena.get(p), Some(Cell::Empty));
            }
            for p in [
                IVec2::new(GRID_WIDTH - 2, GRID_HEIGHT - 2),
                IVec2::new(GRID_WIDTH - 3, GRID_HEIGHT - 2),
                IVec2::new(GRID_WIDTH - 2, GRID_HEIGHT - 3),
            ] {
                assert_eq!(arena.get(p), Some(Cell::Empty));
            }
        }
    }

    #[test]
    fn test_out_of_range_reads_none() {
        let arena = arena(3);
        assert_eq!(arena.get(IVec2::new(-1, 0)), None);
        assert_eq!(arena.get(IVec2::new(0, -1)), None);
        assert_eq!(arena.get(IVec2::new(GRID_WIDTH, 0)), None);
        assert_eq!(arena.get(IVec2::new(0, GRID_HEIGHT)), None);
    }

    #[test]
    fn test_moves_blocked_by_walls_and_bombs() {
        let mut state = GameState::new(Config::default(), 5);
        assert!(!state.valid_move(IVec2::new(0, 1)));
        assert!(state.valid_move(IVec2::new(2, 1)));

        state.bombs.push(Bomb {
            pos: IVec2::new(2, 1),
            timer_ms: BOMB_TIMER_MS,
            owner: Owner::Player,
        });
        assert!(!state.valid_move(IVec2::new(2, 1)));
    }
}
