//! Formation controller
//!
//! Moves the enemy grid as one loosely coupled group: march sideways, reverse
//! and descend on an edge hit, speed up as the grid thins, and fire the
//! occasional bullet. Runs once per Playing frame.

use glam::Vec2;
use rand::Rng;

use super::state::{Bullet, GamePhase, GameState};
use crate::consts::*;

/// Advance the formation by one frame
pub fn update(state: &mut GameState) {
    let mut alive = 0usize;
    let mut hit_edge = false;

    // One scan: count the living and project each one step forward at the
    // previous frame's effective speed to detect an edge hit.
    let step = state.formation.current_speed * state.formation.direction;
    for enemy in &state.enemies {
        if !enemy.alive {
            continue;
        }
        alive += 1;
        let next_x = enemy.pos.x + step;
        if next_x + ENEMY_SIZE > ARENA_WIDTH - EDGE_MARGIN || next_x < EDGE_MARGIN {
            hit_edge = true;
        }
    }

    // Terminal: grid wiped out. Short-circuits before the speed math, which
    // also keeps the alive ratio away from a zero denominator.
    if alive == 0 {
        state.phase = GamePhase::Victory;
        return;
    }

    // Inverse-proportional difficulty: fewer enemies, faster march
    let multiplier = (state.tuning.max_enemies() as f32 / alive.max(1) as f32)
        .min(state.tuning.speed_multiplier_cap);
    state.formation.current_speed = state.formation.base_speed * multiplier;

    if hit_edge {
        // Reverse, then descend and step sideways in the same frame. Dead
        // enemies shift too; they are invisible to rendering and collision,
        // and moving them keeps column spacing consistent.
        state.formation.direction *= -1.0;
        let dx = state.formation.current_speed * state.formation.direction;

        let mut reached_line = false;
        for enemy in &mut state.enemies {
            enemy.pos.y += DESCENT_STEP;
            enemy.pos.x += dx;
            if enemy.pos.y > ARENA_HEIGHT - DEFENSE_LINE_MARGIN {
                reached_line = true;
            }
        }
        if reached_line {
            state.phase = GamePhase::GameOver;
        }

        // Escalate, capped
        state.formation.base_speed = (state.formation.base_speed
            + state.tuning.base_speed_increment)
            .min(state.tuning.base_speed_max);
    } else {
        let dx = state.formation.current_speed * state.formation.direction;
        for enemy in &mut state.enemies {
            enemy.pos.x += dx;
        }
    }

    // Enemy fire: a per-frame Bernoulli trial while under the bullet cap.
    // Bursts are possible; the cap is the only limiter.
    if state.enemy_bullets.len() < MAX_ENEMY_BULLETS
        && state.rng.random_bool(state.tuning.enemy_fire_chance)
    {
        let shooters: Vec<usize> = state
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.alive)
            .map(|(i, _)| i)
            .collect();
        let idx = state.rng.random_range(0..shooters.len());
        let shooter = &state.enemies[shooters[idx]];
        let muzzle = Vec2::new(
            shooter.pos.x + ENEMY_SIZE / 2.0,
            shooter.pos.y + ENEMY_SIZE,
        );
        state
            .enemy_bullets
            .push(Bullet::new(muzzle, ENEMY_BULLET_SPEED));
    }
}
