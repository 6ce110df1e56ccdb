//! Variable-delta rhythm step and strike grading

use glam::Vec2;
use rand::Rng;

use super::state::{
    GOOD_WINDOW, GamePhase, GameState, HIT_WINDOW, LANE_COLORS, MAX_HEALTH, NOTE_CULL_MARGIN,
    NOTE_SPAWN_Y, NOTE_SPEED, Note, PERFECT_WINDOW, Particle, STREAK_BONUS_SPEED,
};

/// Input commands for the rhythm stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Press the given lane
    Strike(usize),
}

/// Grade a lane press against the strike window
///
/// The closest live note within the window is resolved; distance decides
/// points and crowd recovery. A press with no note in reach breaks the
/// streak and costs a little health.
pub fn apply(state: &mut GameState, cmd: Command) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let Command::Strike(lane) = cmd;
    if lane >= state.config.lanes {
        return;
    }

    let center = state.hit_center();
    let mut best: Option<(usize, f32)> = None;
    for (i, note) in state.notes.iter().enumerate() {
        if note.lane != lane || note.missed {
            continue;
        }
        let distance = (note.y - center).abs();
        if distance < HIT_WINDOW && best.is_none_or(|(_, d)| distance < d) {
            best = Some((i, distance));
        }
    }

    match best {
        Some((i, distance)) => {
            state.notes.remove(i);
            let (points, recovery) = if distance < PERFECT_WINDOW {
                (100, 5)
            } else if distance < GOOD_WINDOW {
                (50, 2)
            } else {
                (25, 0)
            };
            state.health = (state.health + recovery).min(MAX_HEALTH);
            state.score += points * state.multiplier;
            state.streak += 1;
            state.multiplier = state.streak / 10 + 1;
            let at = Vec2::new(state.lane_center(lane), center);
            spawn_burst(state, at, LANE_COLORS[lane % LANE_COLORS.len()]);
        }
        None => {
            state.streak = 0;
            state.multiplier = 1;
            state.health = (state.health - 2).max(0);
        }
    }
}

/// Advance the stage by `dt` seconds of real time
pub fn tick(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_secs += dt;

    // Spawning follows a slow intensity wave: crests pack notes tighter
    state.spawn_elapsed += dt;
    if state.spawn_elapsed >= state.next_spawn_secs {
        spawn_note(state);
    }

    // Notes fall; crossing the bottom unstruck drains the crowd meter
    let speed = NOTE_SPEED
        + if state.streak > 20 {
            STREAK_BONUS_SPEED
        } else {
            0.0
        };
    let bottom = state.config.height;
    let mut misses = 0;
    for note in &mut state.notes {
        note.y += speed * dt;
        if note.y > bottom && !note.missed {
            note.missed = true;
            misses += 1;
        }
    }
    for _ in 0..misses {
        state.streak = 0;
        state.multiplier = 1;
        state.health = (state.health - 10).max(0);
    }
    state.notes.retain(|n| n.y < bottom + NOTE_CULL_MARGIN);

    for p in &mut state.particles {
        p.pos += p.vel * dt;
        p.life -= dt * 3.0;
    }
    state.particles.retain(|p| p.life > 0.0);

    if state.health == 0 {
        state.phase = GamePhase::GameOver;
        log::info!("riff set over at score {}", state.score);
    }
}

fn spawn_note(state: &mut GameState) {
    let lane = state.rng.random_range(0..state.config.lanes);
    let id = state.next_id;
    state.next_id += 1;
    state.notes.push(Note {
        id,
        lane,
        y: NOTE_SPAWN_Y,
        missed: false,
    });
    state.spawn_elapsed = 0.0;
    let intensity = ((state.time_secs / 2.0).sin() + 1.0) / 2.0;
    let base = 0.8 - 0.4 * intensity;
    state.next_spawn_secs = base * (0.8 + state.rng.random::<f32>() * 0.5);
}

fn spawn_burst(state: &mut GameState, at: Vec2, color: &str) {
    for i in 0..10u32 {
        let hash = state
            .next_id
            .wrapping_mul(2654435761)
            .wrapping_add(i * 7919);
        let rand1 = (hash % 1000) as f32 / 1000.0 - 0.5;
        let rand2 = ((hash >> 10) % 1000) as f32 / 1000.0 - 0.5;
        state.particles.push(Particle {
            pos: at,
            vel: Vec2::new(rand1 * 600.0, rand2 * 600.0),
            life: 1.0,
            color: color.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riff::state::Config;

    const DT: f32 = 1.0 / 60.0;

    fn fresh(seed: u64) -> GameState {
        GameState::new(Config::default(), seed)
    }

    fn note_at(state: &mut GameState, lane: usize, y: f32) {
        let id = state.next_id;
        state.next_id += 1;
        state.notes.push(Note {
            id,
            lane,
            y,
            missed: false,
        });
    }

    #[test]
    fn test_perfect_strike() {
        let mut state = fresh(1);
        state.health = 50;
        let y = state.hit_center() + 10.0;
        note_at(&mut state, 2, y);

        apply(&mut state, Command::Strike(2));

        assert_eq!(state.score, 100);
        assert_eq!(state.health, 55);
        assert_eq!(state.streak, 1);
        assert!(state.notes.is_empty());
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn test_good_and_ok_bands() {
        let mut state = fresh(1);
        state.health = 50;
        let y = state.hit_center() + 20.0;
        note_at(&mut state, 0, y);
        apply(&mut state, Command::Strike(0));
        assert_eq!(state.score, 50);
        assert_eq!(state.health, 52);

        let y = state.hit_center() + 40.0;
        note_at(&mut state, 0, y);
        apply(&mut state, Command::Strike(0));
        assert_eq!(state.score, 75);
        assert_eq!(state.health, 52);
    }

    #[test]
    fn test_strike_prefers_the_closest_note() {
        let mut state = fresh(1);
        let y = state.hit_center() - 45.0;
        note_at(&mut state, 1, y);
        let y = state.hit_center() - 5.0;
        note_at(&mut state, 1, y);

        apply(&mut state, Command::Strike(1));

        // The perfect note went; the far one is still falling
        assert_eq!(state.score, 100);
        assert_eq!(state.notes.len(), 1);
        assert_eq!(state.notes[0].y, state.hit_center() - 45.0);
    }

    #[test]
    fn test_whiffed_strike_breaks_the_streak() {
        let mut state = fresh(1);
        state.streak = 12;
        state.multiplier = 2;
        note_at(&mut state, 1, 100.0); // far out of the window

        apply(&mut state, Command::Strike(1));

        assert_eq!(state.streak, 0);
        assert_eq!(state.multiplier, 1);
        assert_eq!(state.health, MAX_HEALTH - 2);
        assert_eq!(state.notes.len(), 1);
    }

    #[test]
    fn test_multiplier_steps_every_ten() {
        let mut state = fresh(1);
        for _ in 0..10 {
            let y = state.hit_center();
            note_at(&mut state, 3, y);
            apply(&mut state, Command::Strike(3));
        }
        assert_eq!(state.streak, 10);
        assert_eq!(state.multiplier, 2);
        // Nine strikes at 100, the tenth already paid x1: all at x1
        assert_eq!(state.score, 1000);

        let y = state.hit_center();
        note_at(&mut state, 3, y);
        apply(&mut state, Command::Strike(3));
        assert_eq!(state.score, 1200);
    }

    #[test]
    fn test_missed_note_drains_the_meter() {
        let mut state = fresh(1);
        state.streak = 25;
        state.multiplier = 3;
        let y = state.config.height - 1.0;
        note_at(&mut state, 0, y);

        tick(&mut state, DT);

        assert_eq!(state.health, MAX_HEALTH - 10);
        assert_eq!(state.streak, 0);
        assert_eq!(state.multiplier, 1);
        // The note is inert but still falling out of the field
        assert!(state.notes[0].missed);

        // It only drains once, then falls off the cull line
        for _ in 0..20 {
            tick(&mut state, DT);
        }
        assert_eq!(state.health, MAX_HEALTH - 10);
        assert!(!state.notes.iter().any(|n| n.missed));
    }

    #[test]
    fn test_empty_meter_ends_the_set() {
        let mut state = fresh(1);
        state.health = 10;
        let y = state.config.height - 1.0;
        note_at(&mut state, 0, y);

        tick(&mut state, DT);

        assert_eq!(state.health, 0);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Terminal: strikes and ticks change nothing
        apply(&mut state, Command::Strike(0));
        tick(&mut state, DT);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_notes_spawn_on_the_wave() {
        let mut state = fresh(7);
        for _ in 0..600 {
            tick(&mut state, DT);
        }
        assert!(state.next_id > 5, "ten seconds spawned almost nothing");
        for note in &state.notes {
            assert!(note.lane < state.config.lanes);
        }
    }

    #[test]
    fn test_health_stays_clamped() {
        let mut state = fresh(1);
        for _ in 0..30 {
            let y = state.hit_center();
            note_at(&mut state, 2, y);
            apply(&mut state, Command::Strike(2));
            assert!(state.health <= MAX_HEALTH);
        }
        assert_eq!(state.health, MAX_HEALTH);
    }
}
