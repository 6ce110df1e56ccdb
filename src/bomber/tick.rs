//! Fixed-period arena step: AI cadence, fuses, blasts, damage

use glam::IVec2;

use super::ai;
use super::state::{
    BLAST_RANGE, BOMB_TIMER_MS, Bomb, Cell, EXPLOSION_MS, Explosion, GamePhase, GameState, Owner,
    ROUND_RESTART_MS, TICK_MS,
};
use crate::geom::Direction;

/// Input commands for the bomb arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    PlaceBomb,
}

/// Apply one buffered player command
///
/// Movement only lands on an empty, bomb-free cell; placement only when
/// the player has no bomb of their own armed at their cell. Anything else
/// is a silent no-op.
pub fn apply(state: &mut GameState, cmd: Command) {
    if state.phase != GamePhase::Playing {
        return;
    }
    match cmd {
        Command::Move(dir) => {
            let target = state.player + dir.delta();
            if state.valid_move(target) {
                state.player = target;
            }
        }
        Command::PlaceBomb => place_bomb(state, Owner::Player),
    }
}

fn place_bomb(state: &mut GameState, owner: Owner) {
    let pos = match owner {
        Owner::Player => state.player,
        Owner::Ai => state.ai,
    };
    if state.bomb_at(pos, owner) {
        return;
    }
    state.bombs.push(Bomb {
        pos,
        timer_ms: BOMB_TIMER_MS,
        owner,
    });
}

/// Milliseconds between AI movement decisions; shrinks as rounds climb
pub fn ai_decision_interval(level: u32) -> i32 {
    (700 - level as i32 * 25).max(200)
}

/// Milliseconds between AI bomb drops; also shrinks with the round
pub fn ai_bomb_interval(level: u32) -> i32 {
    (4000 - level as i32 * 150).max(1500)
}

/// Advance the arena by one fixed period
pub fn tick(state: &mut GameState) {
    match state.phase {
        GamePhase::Playing => step_round(state),
        GamePhase::RoundWon | GamePhase::RoundLost => {
            state.restart_ms = state.restart_ms.saturating_sub(TICK_MS);
            if state.restart_ms == 0 {
                state.start_round();
            }
        }
        GamePhase::MatchOver => {}
    }
}

fn step_round(state: &mut GameState) {
    let tick = TICK_MS as i32;

    // AI movement on its per-round cadence
    state.ai_move_cooldown_ms -= tick;
    if state.ai_move_cooldown_ms <= 0 {
        state.ai = ai::choose_move(state);
        state.ai_move_cooldown_ms = ai_decision_interval(state.level);
    }

    // AI bomb drop on a separate, slower cadence
    state.ai_bomb_cooldown_ms -= tick;
    if state.ai_bomb_cooldown_ms <= 0 {
        place_bomb(state, Owner::Ai);
        state.ai_bomb_cooldown_ms = ai_bomb_interval(state.level);
    }

    // Burn fuses; expired bombs detonate after the collection pass
    let mut detonated: Vec<(IVec2, Owner)> = Vec::new();
    for bomb in &mut state.bombs {
        bomb.timer_ms -= tick;
        if bomb.timer_ms <= 0 {
            detonated.push((bomb.pos, bomb.owner));
        }
    }
    state.bombs.retain(|b| b.timer_ms > 0);

    // Age existing blast cells before this tick's join
    for ex in &mut state.explosions {
        ex.timer_ms -= tick;
    }
    state.explosions.retain(|ex| ex.timer_ms > 0);

    for (pos, owner) in detonated {
        detonate(state, pos, owner);
    }

    // Damage resolution; a player hit outranks a round win on the same tick
    let player_hit = state.explosions.iter().any(|ex| ex.pos == state.player);
    let ai_hit = state
        .explosions
        .iter()
        .any(|ex| ex.pos == state.ai && ex.owner == Owner::Player);

    if player_hit {
        if state.lives > 1 {
            state.lives -= 1;
            state.phase = GamePhase::RoundLost;
            state.restart_ms = ROUND_RESTART_MS;
            log::info!("bomber round lost, {} lives left", state.lives);
        } else {
            state.lives = 0;
            state.phase = GamePhase::MatchOver;
            log::info!("bomber match over at score {}", state.score);
        }
    } else if ai_hit {
        state.score += 100 * state.level;
        state.level += 1;
        state.phase = GamePhase::RoundWon;
        state.restart_ms = ROUND_RESTART_MS;
        log::info!(
            "bomber round won, next round {} at score {}",
            state.level,
            state.score
        );
    }
}

/// Expand a detonation into blast cells, carving crates as the rays go.
/// Each ray converts at most one crate and never touches a wall.
fn detonate(state: &mut GameState, pos: IVec2, owner: Owner) {
    let mut blast = vec![pos];
    for dir in Direction::ALL {
        for i in 1..=BLAST_RANGE {
            let p = pos + dir.delta() * i;
            match state.arena.get(p) {
                None | Some(Cell::Wall) => break,
                Some(Cell::Crate) => {
                    state.arena.set(p, Cell::Empty);
                    blast.push(p);
                    break;
                }
                Some(Cell::Empty) => blast.push(p),
            }
        }
    }
    for p in blast {
        state.explosions.push(Explosion {
            pos: p,
            timer_ms: EXPLOSION_MS,
            owner,
        });
    }
}
