//! Scripted opponent: flee armed blasts, otherwise close in on the player

use std::collections::HashSet;

use glam::IVec2;
use rand::Rng;
use rand::seq::SliceRandom;

use super::state::{BLAST_RANGE, Cell, GameState};
use crate::geom::{Direction, manhattan};

/// Every cell the currently armed bombs will strike when they detonate
///
/// Rays mirror the detonation exactly: a wall (or the arena edge) stops a
/// ray before inclusion, a crate is included and absorbs the rest.
pub fn danger_cells(state: &GameState) -> HashSet<IVec2> {
    let mut cells = HashSet::new();
    for bomb in &state.bombs {
        cells.insert(bomb.pos);
        for dir in Direction::ALL {
            for i in 1..=BLAST_RANGE {
                let p = bomb.pos + dir.delta() * i;
                match state.arena.get(p) {
                    None | Some(Cell::Wall) => break,
                    Some(Cell::Crate) => {
                        cells.insert(p);
                        break;
                    }
                    Some(Cell::Empty) => {
                        cells.insert(p);
                    }
                }
            }
        }
    }
    cells
}

/// Choose the cell the AI occupies for this decision window
///
/// Standing in danger forces a flee to a uniformly random safe neighbor
/// (or staying put when none exists). Otherwise the neighbors are
/// shuffled, then stable-sorted by Manhattan distance to the player, so
/// equal-distance candidates keep an unpredictable order; the first valid
/// one wins.
pub fn choose_move(state: &mut GameState) -> IVec2 {
    let danger = danger_cells(state);
    let ai = state.ai;

    if danger.contains(&ai) {
        let safe: Vec<IVec2> = Direction::ALL
            .iter()
            .map(|d| ai + d.delta())
            .filter(|p| state.valid_move(*p) && !danger.contains(p))
            .collect();
        if safe.is_empty() {
            return ai;
        }
        return safe[state.rng.random_range(0..safe.len())];
    }

    let mut dirs = Direction::ALL;
    dirs.shuffle(&mut state.rng);
    let mut candidates: Vec<IVec2> = dirs.iter().map(|d| ai + d.delta()).collect();
    candidates.sort_by_key(|p| manhattan(*p, state.player));
    candidates
        .into_iter()
        .find(|p| state.valid_move(*p))
        .unwrap_or(ai)
}
