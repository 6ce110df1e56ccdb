//! Fixed-period growth-grid step

use super::state::{GamePhase, GameState};
use crate::geom::Direction;

/// Input commands for the growth-grid engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
}

/// Queue a direction change
///
/// A request on the axis the snake is currently moving along (including an
/// outright reversal) is a silent no-op; otherwise only the latest accepted
/// request survives to the next step.
pub fn apply(state: &mut GameState, cmd: Command) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let Command::Turn(dir) = cmd;
    if dir.same_axis(state.dir) {
        return;
    }
    state.pending_dir = Some(dir);
}

/// Advance one grid step
pub fn tick(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }

    if let Some(dir) = state.pending_dir.take() {
        state.dir = dir;
    }

    let head = state.snake[0] + state.dir.delta();

    if head.x < 0 || head.x >= state.config.width || head.y < 0 || head.y >= state.config.height {
        state.phase = GamePhase::GameOver;
        return;
    }

    // Self collision, ignoring the tail cell that vacates this step. The
    // tail only stays put on a growth step, and food is never under the
    // snake, so a head landing on the tail cell is always safe.
    let body = &state.snake[..state.snake.len() - 1];
    if body.contains(&head) {
        state.phase = GamePhase::GameOver;
        return;
    }

    state.snake.insert(0, head);

    if head == state.food {
        state.score += 1;
        state.spawn_food();
        state.retune();
    } else {
        state.snake.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::state::{Config, GRID_SIZE};
    use glam::IVec2;
    use proptest::prelude::*;

    fn fresh(seed: u64) -> GameState {
        GameState::new(Config::default(), seed)
    }

    #[test]
    fn test_eating_grows_and_respawns_food() {
        let mut state = fresh(42);
        state.food = IVec2::new(11, 10);

        tick(&mut state);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.snake[0], IVec2::new(11, 10));
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 2);
        assert_ne!(state.food, IVec2::new(11, 10));
        assert_ne!(state.food, IVec2::new(10, 10));
    }

    #[test]
    fn test_plain_move_keeps_length() {
        let mut state = fresh(42);
        state.food = IVec2::new(0, 0);

        tick(&mut state);

        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake[0], IVec2::new(11, 10));
    }

    #[test]
    fn test_wall_ends_the_run() {
        let mut state = fresh(1);
        state.snake = vec![IVec2::new(GRID_SIZE - 1, 10)];
        state.food = IVec2::new(0, 0);

        tick(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        // Snapshot keeps the last live position
        assert_eq!(state.snake[0], IVec2::new(GRID_SIZE - 1, 10));
    }

    #[test]
    fn test_reverse_request_is_a_no_op() {
        let mut state = fresh(1);
        apply(&mut state, Command::Turn(Direction::Left));
        assert_eq!(state.pending_dir, None);

        // Quick Up-then-Left does not chain into a reversal either: Left is
        // still on the axis of the applied direction until Up takes effect.
        apply(&mut state, Command::Turn(Direction::Up));
        apply(&mut state, Command::Turn(Direction::Left));
        assert_eq!(state.pending_dir, Some(Direction::Up));

        state.food = IVec2::new(0, 0);
        tick(&mut state);
        assert_eq!(state.dir, Direction::Up);

        apply(&mut state, Command::Turn(Direction::Left));
        assert_eq!(state.pending_dir, Some(Direction::Left));
    }

    #[test]
    fn test_self_collision_ends_the_run() {
        let mut state = fresh(1);
        // A hook: head at (5,5) moving right into its own body at (6,5)
        state.snake = vec![
            IVec2::new(5, 5),
            IVec2::new(5, 6),
            IVec2::new(6, 6),
            IVec2::new(6, 5),
            IVec2::new(7, 5),
        ];
        state.food = IVec2::new(0, 0);

        tick(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_tail_cell_is_safe_while_vacating() {
        let mut state = fresh(1);
        // A 2x2 loop: head moves onto the tail cell, which vacates this step
        state.snake = vec![
            IVec2::new(5, 5),
            IVec2::new(6, 5),
            IVec2::new(6, 6),
            IVec2::new(5, 6),
        ];
        state.dir = Direction::Down;
        state.food = IVec2::new(0, 0);

        tick(&mut state);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.snake[0], IVec2::new(5, 6));
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_terminal_state_ignores_input_and_ticks() {
        let mut state = fresh(1);
        state.phase = GamePhase::GameOver;
        let before = state.snake.clone();

        apply(&mut state, Command::Turn(Direction::Up));
        tick(&mut state);

        assert_eq!(state.pending_dir, None);
        assert_eq!(state.snake, before);
    }

    proptest! {
        #[test]
        fn prop_length_tracks_score(seed in any::<u64>(), moves in proptest::collection::vec(0..4usize, 0..150)) {
            let mut state = fresh(seed);
            for &m in &moves {
                apply(&mut state, Command::Turn(Direction::ALL[m]));
                tick(&mut state);
                if state.phase == GamePhase::GameOver {
                    break;
                }
                prop_assert_eq!(state.snake.len() as u32, state.score + 1);
                prop_assert!(!state.snake.contains(&state.food));
            }
        }

        #[test]
        fn prop_heading_never_reverses(seed in any::<u64>(), moves in proptest::collection::vec(0..4usize, 1..100)) {
            let mut state = fresh(seed);
            for &m in &moves {
                let before = state.dir;
                apply(&mut state, Command::Turn(Direction::ALL[m]));
                tick(&mut state);
                if state.phase == GamePhase::GameOver {
                    break;
                }
                prop_assert_ne!(state.dir, before.opposite());
            }
        }
    }
}
