//! Bomb arena duel ("Bomber Alien")
//!
//! Two grid-bound agents, the player and a scripted alien, drop bombs with
//! delayed area blasts that carve the destructible arena. The alien flees
//! armed blast zones and otherwise chases the player. Rounds repeat on a
//! fresh arena until the player's lives run out.

mod ai;
mod state;
mod tick;

pub use ai::{choose_move, danger_cells};
pub use state::{
    Arena, Bomb, Cell, Config, Explosion, GamePhase, GameState, Owner, BLAST_RANGE, BOMB_TIMER_MS,
    EXPLOSION_MS, INITIAL_LIVES, ROUND_RESTART_MS, TICK_MS,
};
pub use tick::{ai_bomb_interval, ai_decision_interval, apply, tick, Command};

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
            GamePhase::Playing => None,
            GamePhase::RoundWon => Some(format!("Round {} won!", self.level - 1)),
            GamePhase::RoundLost => Some("You got hit!".to_string()),
            GamePhase::MatchOver => Some(format!("{player}, the alien defeated you!")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Direction;
    use crate::session::Session;

    #[test]
    fn test_session_buffers_until_tick() {
        let mut session: Session<GameState> = Session::new(Config::default(), 4, "Luna");
        session.apply_input(Command::Move(Direction::Down));
        session.apply_input(Command::PlaceBomb);

        let before = session.snapshot();
        assert!(before.bombs.is_empty());

        let snap = session.tick(0.1);
        assert_eq!(snap.bombs.iter().filter(|b| b.owner == Owner::Player).count(), 1);
    }

    #[test]
    fn test_reset_clears_the_match() {
        let mut session: Session<GameState> = Session::new(Config::default(), 4, "Luna");
        for _ in 0..40 {
            session.apply_input(Command::PlaceBomb);
            session.tick(0.1);
        }
        let snap = session.reset();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.level, 1);
        assert_eq!(snap.lives, INITIAL_LIVES);
        assert!(snap.bombs.is_empty());
        assert!(snap.explosions.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(Config::default(), 1234);
        let mut b = GameState::new(Config::default(), 1234);
        for i in 0..200 {
            let cmd = if i % 5 == 0 {
                Command::PlaceBomb
            } else {
                Command::Move(Direction::ALL[i % 4])
            };
            apply(&mut a, cmd);
            apply(&mut b, cmd);
            tick(&mut a);
            tick(&mut b);
        }
        let a_json = serde_json::to_string(&a).unwrap();
        let b_json = serde_json::to_string(&b).unwrap();
        assert_eq!(a_json, b_json);
    }
}
