//! Combat resolution
//!
//! Bullet-vs-enemy and bullet-vs-player checks, scoring and life loss. Runs
//! once per frame after the formation controller; it still runs in the frame
//! where the controller flipped to a terminal phase, which no longer matters
//! the frame after.

use super::state::{GamePhase, GameState};
use crate::consts::KILL_SCORE;

/// Resolve all collisions for this frame
pub fn resolve(state: &mut GameState) {
    // Player bullets vs the grid. Storage order is the fixed iteration
    // order; the first living hit consumes the bullet, so one bullet never
    // kills twice even when it geometrically overlaps two enemies.
    for bullet in &mut state.player_bullets {
        if !bullet.active {
            continue;
        }
        for enemy in &mut state.enemies {
            if !enemy.alive {
                continue;
            }
            if bullet.rect().intersects(&enemy.rect()) {
                enemy.alive = false;
                bullet.active = false;
                state.score += KILL_SCORE;
                break;
            }
        }
    }

    // Enemy bullets vs the player. No invulnerability window: two distinct
    // bullets landing in the same frame cost two lives.
    let player_box = state.player.rect();
    for bullet in &mut state.enemy_bullets {
        if !bullet.active {
            continue;
        }
        if bullet.rect().intersects(&player_box) {
            bullet.active = false;
            state.lives = state.lives.saturating_sub(1);
            if state.lives == 0 {
                state.phase = GamePhase::GameOver;
            }
        }
    }
}
