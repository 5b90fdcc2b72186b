//! Per-frame orchestration
//!
//! One `tick` is one atomic simulation step: player, bullets, bullet
//! compaction, formation, combat, in that order. Movement is per-frame-count,
//! not per-elapsed-time; the host's timestamp never reaches the simulation.

use super::combat;
use super::formation;
use super::state::{GamePhase, GameState};

/// Input flags for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held: move left
    pub left: bool,
    /// Held: move right
    pub right: bool,
    /// Edge-triggered: set on the press transition only, one shot per press
    pub fire: bool,
}

/// Advance the session by one frame.
///
/// Returns the schedule-next-frame signal: `true` while the session is still
/// Playing after this step. Outside Playing the step is a no-op and returns
/// `false`; the host re-arms the loop on the next start command.
#[must_use]
pub fn tick(state: &mut GameState, input: &TickInput) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    state.frame += 1;

    state.player.update(input.left, input.right);
    if input.fire {
        state.player_shoot();
    }

    for bullet in &mut state.player_bullets {
        bullet.update();
    }
    for bullet in &mut state.enemy_bullets {
        bullet.update();
    }
    // Compact boundary exits; bullets spent in last frame's combat go too
    state.player_bullets.retain(|b| b.active);
    state.enemy_bullets.retain(|b| b.active);

    formation::update(state);
    combat::resolve(state);

    state.phase == GamePhase::Playing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::Bullet;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default());
        state.start(seed);
        state
    }

    #[test]
    fn test_no_updates_outside_playing() {
        let mut state = GameState::new(1, Tuning::default());
        assert_eq!(state.phase, GamePhase::Start);

        let positions: Vec<Vec2> = state.enemies.iter().map(|e| e.pos).collect();
        let keep_going = tick(&mut state, &TickInput {
            left: true,
            right: false,
            fire: true,
        });

        assert!(!keep_going);
        assert_eq!(state.frame, 0);
        assert!(state.player_bullets.is_empty());
        let after: Vec<Vec2> = state.enemies.iter().map(|e| e.pos).collect();
        assert_eq!(positions, after);
    }

    #[test]
    fn test_playing_frame_requests_continuation() {
        let mut state = playing_state(1);
        let keep_going = tick(&mut state, &TickInput::default());
        assert!(keep_going);
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_fire_flag_shoots_once_per_frame() {
        let mut state = playing_state(1);
        let fire = TickInput {
            fire: true,
            ..TickInput::default()
        };
        let _ = tick(&mut state, &fire);
        assert_eq!(state.player_bullets.len(), 1);
        let _ = tick(&mut state, &fire);
        assert_eq!(state.player_bullets.len(), 2);
        // At the cap the extra press is absorbed
        let _ = tick(&mut state, &fire);
        assert_eq!(state.player_bullets.len(), 2);
    }

    #[test]
    fn test_boundary_exits_are_compacted() {
        let mut state = playing_state(1);
        state
            .player_bullets
            .push(Bullet::new(Vec2::new(400.0, 5.0), PLAYER_BULLET_SPEED));

        let _ = tick(&mut state, &TickInput::default());
        assert!(state.player_bullets.is_empty());
    }

    #[test]
    fn test_wipeout_stops_the_loop() {
        let mut state = playing_state(1);
        for enemy in &mut state.enemies {
            enemy.alive = false;
        }
        let keep_going = tick(&mut state, &TickInput::default());
        assert!(!keep_going);
        assert_eq!(state.phase, GamePhase::Victory);
    }

    #[test]
    fn test_final_life_loss_stops_the_loop() {
        let mut state = GameState::new(1, Tuning {
            enemy_fire_chance: 0.0,
            ..Tuning::default()
        });
        state.start(1);
        state.lives = 1;
        // Parked inside the player's box; still overlapping after one step
        state
            .enemy_bullets
            .push(Bullet::new(state.player.pos, ENEMY_BULLET_SPEED));

        let keep_going = tick(&mut state, &TickInput::default());
        assert!(!keep_going);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs stay identical
        let mut a = playing_state(99999);
        let mut b = playing_state(99999);

        for frame in 0..600u32 {
            let input = TickInput {
                left: frame % 7 < 3,
                right: frame % 11 < 4,
                fire: frame % 13 == 0,
            };
            let _ = tick(&mut a, &input);
            let _ = tick(&mut b, &input);
        }

        assert_eq!(a.frame, b.frame);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.score, b.score);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.enemy_bullets.len(), b.enemy_bullets.len());
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.pos, eb.pos);
            assert_eq!(ea.alive, eb.alive);
        }
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_player_never_leaves_the_arena(
                moves in prop::collection::vec(any::<(bool, bool)>(), 1..400)
            ) {
                let mut state = playing_state(1);
                for (left, right) in moves {
                    let _ = tick(&mut state, &TickInput { left, right, fire: false });
                    prop_assert!(state.player.pos.x >= 0.0);
                    prop_assert!(state.player.pos.x <= ARENA_WIDTH - PLAYER_WIDTH);
                }
            }

            #[test]
            fn prop_bullet_caps_hold_under_spam(
                frames in 1usize..300,
                seed in any::<u64>()
            ) {
                // Hold fire every frame on both sides
                let mut state = GameState::new(seed, Tuning {
                    enemy_fire_chance: 1.0,
                    ..Tuning::default()
                });
                state.start(seed);
                for _ in 0..frames {
                    let _ = tick(&mut state, &TickInput { left: false, right: false, fire: true });
                    prop_assert!(state.player_bullets.len() <= MAX_PLAYER_BULLETS);
                    prop_assert!(state.enemy_bullets.len() <= MAX_ENEMY_BULLETS);
                }
            }

            #[test]
            fn prop_score_only_grows(frames in 1usize..300, seed in any::<u64>()) {
                let mut state = playing_state(seed);
                let mut last = state.score;
                for frame in 0..frames {
                    let _ = tick(&mut state, &TickInput {
                        left: frame % 2 == 0,
                        right: frame % 3 == 0,
                        fire: true,
                    });
                    prop_assert!(state.score >= last);
                    last = state.score;
                }
            }
        }
    }
}
