//! Variable-delta shooter step
//!
//! Driven by the host's animation callback with real elapsed time, unlike
//! the fixed-period grid games.

use glam::Vec2;
use rand::Rng;

use super::state::{
    BULLET_HEIGHT, BULLET_SPEED, BULLET_WIDTH, Bullet, DOUBLE_SHOT_SECS, ENEMY_SIZE,
    FIRE_COOLDOWN_SECS, FORMATION_MARGIN, GamePhase, GameState, HIT_COLOR, INVULNERABILITY_SECS,
    LEVEL_UP_SECS, MAX_PARTICLES, PARTICLE_COUNT, PARTICLE_LIFESPAN_SECS, POWERUP_SIZE,
    POWERUP_SPAWN_CHANCE, POWERUP_SPEED, Particle, PowerUp, PowerUpKind, SHIELD_COLOR, SHIP_SPEED,
};

/// Input commands for the formation shooter
///
/// Movement and fire are held flags: the on-screen controls and the
/// keyboard both emit press/release pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft(bool),
    MoveRight(bool),
    Fire(bool),
}

/// Update the held-input flags
pub fn apply(state: &mut GameState, cmd: Command) {
    match cmd {
        Command::MoveLeft(held) => state.move_left = held,
        Command::MoveRight(held) => state.move_right = held,
        Command::Fire(held) => state.firing = held,
    }
}

/// What a hit against the player resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HitOutcome {
    /// Invulnerability window swallowed the hit
    Ignored,
    /// Shield consumed; no life lost, no invulnerability started
    ShieldBroken,
    LifeLost,
    GameOver,
}

/// Damage rule shared by invasions and direct collisions
fn damage_player(state: &mut GameState) -> HitOutcome {
    if state.status.invulnerable_secs > 0.0 {
        return HitOutcome::Ignored;
    }
    if state.status.shield {
        state.status.shield = false;
        return HitOutcome::ShieldBroken;
    }
    if state.lives > 1 {
        state.lives -= 1;
        state.status.invulnerable_secs = INVULNERABILITY_SECS;
        HitOutcome::LifeLost
    } else {
        state.lives = 0;
        state.phase = GamePhase::GameOver;
        log::info!("invaders game over at score {}", state.score);
        HitOutcome::GameOver
    }
}

/// Advance the shooter by `dt` seconds of real time
pub fn tick(state: &mut GameState, dt: f32) {
    state.time_ticks += 1;

    match state.phase {
        GamePhase::GameOver => return,
        GamePhase::LevelUp => {
            update_particles(state, dt);
            state.level_up_secs -= dt;
            if state.level_up_secs <= 0.0 {
                state.level += 1;
                let level = state.level;
                state.setup_level(level);
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::Playing => {}
    }

    // --- SHIP ---
    if state.move_left {
        state.ship.pos.x -= SHIP_SPEED * dt;
    }
    if state.move_right {
        state.ship.pos.x += SHIP_SPEED * dt;
    }
    state.ship.pos.x = state
        .ship
        .pos
        .x
        .clamp(0.0, state.config.width - state.ship.size.x);

    state.fire_cooldown = (state.fire_cooldown - dt).max(0.0);
    if state.firing && state.fire_cooldown == 0.0 {
        fire(state);
        state.fire_cooldown = FIRE_COOLDOWN_SECS;
    }

    // --- BULLETS ---
    for b in &mut state.bullets {
        b.rect.pos.y -= BULLET_SPEED * dt;
    }
    state.bullets.retain(|b| b.rect.bottom() > 0.0);

    // --- FORMATION ---
    // The block sweeps sideways; the tick any member touches a margin it
    // reverses and every enemy steps down half an enemy.
    let dx = state.formation.speed * state.formation.dir * dt;
    for e in &mut state.enemies {
        e.rect.pos.x += dx;
    }
    let right_bound = state.config.width - FORMATION_MARGIN;
    let edge_reached = state
        .enemies
        .iter()
        .any(|e| e.rect.left() < FORMATION_MARGIN || e.rect.right() > right_bound);
    if edge_reached {
        state.formation.dir = -state.formation.dir;
        for e in &mut state.enemies {
            e.rect.pos.y += ENEMY_SIZE / 2.0;
        }
    }

    // --- INVASIONS ---
    // An enemy past the bottom is gone, and counts as a hit on the player
    let bottom = state.config.height;
    let mut i = 0;
    while i < state.enemies.len() {
        if state.enemies[i].rect.top() > bottom {
            state.enemies.remove(i);
            let ship_center = state.ship.center();
            match damage_player(state) {
                HitOutcome::ShieldBroken => spawn_burst(state, ship_center, SHIELD_COLOR),
                HitOutcome::LifeLost | HitOutcome::GameOver => {
                    spawn_burst(state, ship_center, HIT_COLOR)
                }
                HitOutcome::Ignored => {}
            }
        } else {
            i += 1;
        }
    }

    // --- ENEMY-SHIP CONTACT ---
    let mut i = 0;
    while i < state.enemies.len() {
        let overlap = state.enemies[i].rect.overlaps(&state.ship);
        if overlap && state.status.invulnerable_secs <= 0.0 {
            let enemy = state.enemies.remove(i);
            match damage_player(state) {
                HitOutcome::ShieldBroken => {
                    // Normal destroy-and-score path, paid for with the shield
                    state.score += 10 * state.level;
                    let color = state.style.enemy_colors[enemy.color].clone();
                    spawn_burst(state, enemy.rect.center(), &color);
                }
                HitOutcome::LifeLost | HitOutcome::GameOver => {
                    let ship_center = state.ship.center();
                    spawn_burst(state, ship_center, HIT_COLOR);
                }
                HitOutcome::Ignored => {}
            }
        } else {
            i += 1;
        }
    }

    // --- BULLET-ENEMY HITS ---
    let mut bi = 0;
    'bullets: while bi < state.bullets.len() {
        for ei in 0..state.enemies.len() {
            if state.bullets[bi].rect.overlaps(&state.enemies[ei].rect) {
                let enemy = state.enemies.remove(ei);
                state.bullets.remove(bi);
                state.score += 10 * state.level;
                let color = state.style.enemy_colors[enemy.color].clone();
                spawn_burst(state, enemy.rect.center(), &color);

                if state.rng.random_bool(POWERUP_SPAWN_CHANCE) {
                    let kind = if state.rng.random_bool(0.5) {
                        PowerUpKind::DoubleShot
                    } else {
                        PowerUpKind::Shield
                    };
                    let center = enemy.rect.center();
                    state.powerups.push(PowerUp {
                        rect: crate::geom::Rect::new(
                            center.x - POWERUP_SIZE / 2.0,
                            enemy.rect.top(),
                            POWERUP_SIZE,
                            POWERUP_SIZE,
                        ),
                        kind,
                    });
                }
                continue 'bullets;
            }
        }
        bi += 1;
    }

    // --- POWER-UPS ---
    for p in &mut state.powerups {
        p.rect.pos.y += POWERUP_SPEED * dt;
    }
    let ship = state.ship;
    let mut collected: Vec<PowerUpKind> = Vec::new();
    state.powerups.retain(|p| {
        if p.rect.overlaps(&ship) {
            collected.push(p.kind);
            false
        } else {
            p.rect.top() < bottom
        }
    });
    for kind in collected {
        match kind {
            PowerUpKind::DoubleShot => state.status.double_shot_secs = DOUBLE_SHOT_SECS,
            PowerUpKind::Shield => state.status.shield = true,
        }
    }

    // --- TIMERS ---
    state.status.double_shot_secs = (state.status.double_shot_secs - dt).max(0.0);
    state.status.invulnerable_secs = (state.status.invulnerable_secs - dt).max(0.0);

    update_particles(state, dt);

    // --- WAVE CLEAR ---
    if state.enemies.is_empty() && state.phase == GamePhase::Playing {
        state.phase = GamePhase::LevelUp;
        state.level_up_secs = LEVEL_UP_SECS;
        log::info!("invaders wave {} cleared at score {}", state.level, state.score);
    }
}

/// One volley: a single bullet, or an offset pair while double shot holds
fn fire(state: &mut GameState) {
    let mid = state.ship.pos.x + state.ship.size.x / 2.0;
    let y = state.ship.top();
    if state.status.double_shot_secs > 0.0 {
        state.bullets.push(Bullet {
            rect: crate::geom::Rect::new(mid - BULLET_WIDTH * 2.0, y, BULLET_WIDTH, BULLET_HEIGHT),
        });
        state.bullets.push(Bullet {
            rect: crate::geom::Rect::new(mid + BULLET_WIDTH, y, BULLET_WIDTH, BULLET_HEIGHT),
        });
    } else {
        state.bullets.push(Bullet {
            rect: crate::geom::Rect::new(mid - BULLET_WIDTH / 2.0, y, BULLET_WIDTH, BULLET_HEIGHT),
        });
    }
}

/// Decorative burst at an impact point. Hash-mix spread keeps the
/// particles off the gameplay RNG stream.
fn spawn_burst(state: &mut GameState, at: Vec2, color: &str) {
    for i in 0..PARTICLE_COUNT {
        if state.particles.len() >= MAX_PARTICLES {
            state.particles.remove(0);
        }
        let hash = (state.time_ticks as u32)
            .wrapping_mul(2654435761)
            .wrapping_add(i as u32 * 7919);
        let rand1 = (hash % 1000) as f32 / 1000.0 - 0.5;
        let rand2 = ((hash >> 10) % 1000) as f32 / 1000.0 - 0.5;
        let rand3 = ((hash >> 20) % 1000) as f32 / 1000.0;
        state.particles.push(Particle {
            pos: at,
            vel: Vec2::new(rand1 * 360.0, rand2 * 360.0),
            radius: 1.0 + rand3 * 3.0,
            alpha: 1.0,
            color: color.to_string(),
        });
    }
}

fn update_particles(state: &mut GameState, dt: f32) {
    for p in &mut state.particles {
        p.pos += p.vel * dt;
        p.alpha -= dt / PARTICLE_LIFESPAN_SECS;
    }
    state.particles.retain(|p| p.alpha > 0.0);
}
