//! Session state and core simulation types
//!
//! One `GameState` value is the whole session: entities, score, lives, phase
//! and the seeded RNG. The host owns exactly one (tests own as many as they
//! like) and nothing here touches global state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Idle, awaiting the explicit start command
    Start,
    /// Simulation runs
    Playing,
    /// Terminal until restart: lives ran out or the grid reached the defense line
    GameOver,
    /// Terminal until restart: the grid was wiped out
    Victory,
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
}

impl Player {
    /// Spawn centered horizontally, just above the bottom edge
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(
                ARENA_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
                ARENA_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_GAP,
            ),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    /// Move on the held directional flags, clamped to the arena.
    /// Horizontal only; the ship never leaves its row.
    pub fn update(&mut self, left: bool, right: bool) {
        if left {
            self.pos.x -= PLAYER_SPEED;
        }
        if right {
            self.pos.x += PLAYER_SPEED;
        }
        self.pos.x = self.pos.x.clamp(0.0, ARENA_WIDTH - PLAYER_WIDTH);
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// One grid enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    /// Soft-delete flag: dead enemies stay in the collection but are
    /// excluded from scanning, shooting and collision. Never reset to true
    /// within a session.
    pub alive: bool,
}

impl Enemy {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, alive: true }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(ENEMY_SIZE))
    }
}

/// A bullet, fired by either side. Ownership is implied by the collection
/// that holds it.
#[derive(Debug, Clone)]
pub struct Bullet {
    /// Top-left corner
    pub pos: Vec2,
    /// Signed vertical speed per frame: negative = upward (player-fired)
    pub vy: f32,
    pub active: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, vy: f32) -> Self {
        Self {
            pos,
            vy,
            active: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT))
    }

    /// Advance vertically; deactivate past either vertical arena edge
    pub fn update(&mut self) {
        self.pos.y += self.vy;
        if self.pos.y < 0.0 || self.pos.y > ARENA_HEIGHT {
            self.active = false;
        }
    }
}

/// Formation movement state, reset at session start
#[derive(Debug, Clone)]
pub struct Formation {
    /// Horizontal direction: 1.0 = rightward, -1.0 = leftward
    pub direction: f32,
    /// Grows on every edge hit, capped
    pub base_speed: f32,
    /// `base_speed` scaled by the inverse alive ratio, derived each frame
    pub current_speed: f32,
}

impl Formation {
    fn new(tuning: &Tuning) -> Self {
        Self {
            direction: 1.0,
            base_speed: tuning.base_speed_start,
            current_speed: tuning.base_speed_start,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u8,
    /// Simulation frame counter
    pub frame: u64,
    pub player: Player,
    /// The full grid, living and dead; never resized within a session
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub formation: Formation,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a session in the Start phase. The grid is already laid out so
    /// the attract screen has something to show; `start` rebuilds everything.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            phase: GamePhase::Start,
            score: 0,
            lives: STARTING_LIVES,
            frame: 0,
            player: Player::new(),
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            formation: Formation::new(&tuning),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.spawn_grid();
        state
    }

    /// The explicit start/restart command. Valid from any phase; fully
    /// replaces the previous session.
    pub fn start(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.frame = 0;
        self.player = Player::new();
        self.spawn_grid();
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.formation = Formation::new(&self.tuning);
        self.phase = GamePhase::Playing;
    }

    /// Lay out the full grid, all alive, centered horizontally
    fn spawn_grid(&mut self) {
        let cols = self.tuning.enemy_cols;
        let offset_x = (ARENA_WIDTH - cols as f32 * GRID_SPACING_X) / 2.0;
        self.enemies.clear();
        for row in 0..self.tuning.enemy_rows {
            for col in 0..cols {
                self.enemies.push(Enemy::new(Vec2::new(
                    offset_x + col as f32 * GRID_SPACING_X,
                    GRID_OFFSET_Y + row as f32 * GRID_SPACING_Y,
                )));
            }
        }
    }

    /// Fire one upward bullet from the ship's center, silently ignored at
    /// the live-bullet cap.
    pub fn player_shoot(&mut self) {
        if self.player_bullets.len() >= MAX_PLAYER_BULLETS {
            return;
        }
        self.player_bullets.push(Bullet::new(
            Vec2::new(
                self.player.pos.x + PLAYER_WIDTH / 2.0 - BULLET_WIDTH / 2.0,
                self.player.pos.y,
            ),
            PLAYER_BULLET_SPEED,
        ));
    }

    pub fn alive_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_layout() {
        let state = GameState::new(7, Tuning::default());
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.enemies.len(), 50);
        assert!(state.enemies.iter().all(|e| e.alive));
        assert_eq!(state.lives, STARTING_LIVES);

        // Ship centered on its row above the bottom edge
        assert_eq!(state.player.pos.x, ARENA_WIDTH / 2.0 - PLAYER_WIDTH / 2.0);
        assert_eq!(
            state.player.pos.y,
            ARENA_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_GAP
        );
    }

    #[test]
    fn test_grid_is_centered() {
        let state = GameState::new(7, Tuning::default());
        let first = &state.enemies[0];
        let last = &state.enemies[state.enemies.len() - 1];
        assert_eq!(first.pos, Vec2::new(100.0, 50.0));
        assert_eq!(last.pos, Vec2::new(100.0 + 9.0 * 60.0, 50.0 + 4.0 * 50.0));
    }

    #[test]
    fn test_player_clamps_at_edges() {
        let mut player = Player::new();
        for _ in 0..1000 {
            player.update(true, false);
        }
        assert_eq!(player.pos.x, 0.0);
        for _ in 0..1000 {
            player.update(false, true);
        }
        assert_eq!(player.pos.x, ARENA_WIDTH - PLAYER_WIDTH);
    }

    #[test]
    fn test_both_directions_cancel() {
        let mut player = Player::new();
        let x = player.pos.x;
        player.update(true, true);
        assert_eq!(player.pos.x, x);
    }

    #[test]
    fn test_bullet_deactivates_past_top() {
        let mut bullet = Bullet::new(Vec2::new(100.0, 5.0), PLAYER_BULLET_SPEED);
        bullet.update();
        assert!(!bullet.active);
        assert_eq!(bullet.pos.x, 100.0);
    }

    #[test]
    fn test_bullet_deactivates_past_bottom() {
        let mut bullet = Bullet::new(Vec2::new(100.0, ARENA_HEIGHT - 1.0), ENEMY_BULLET_SPEED);
        bullet.update();
        assert!(!bullet.active);
    }

    #[test]
    fn test_shoot_cap_is_idempotent() {
        let mut state = GameState::new(7, Tuning::default());
        state.player_shoot();
        state.player_shoot();
        assert_eq!(state.player_bullets.len(), MAX_PLAYER_BULLETS);

        let before: Vec<Vec2> = state.player_bullets.iter().map(|b| b.pos).collect();
        state.player_shoot();
        assert_eq!(state.player_bullets.len(), MAX_PLAYER_BULLETS);
        let after: Vec<Vec2> = state.player_bullets.iter().map(|b| b.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_bullet_spawns_at_ship_center() {
        let mut state = GameState::new(7, Tuning::default());
        state.player_shoot();
        let bullet = &state.player_bullets[0];
        assert_eq!(
            bullet.pos.x,
            state.player.pos.x + PLAYER_WIDTH / 2.0 - BULLET_WIDTH / 2.0
        );
        assert_eq!(bullet.pos.y, state.player.pos.y);
        assert!(bullet.vy < 0.0);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new(7, Tuning::default());
        state.start(7);
        state.score = 4200;
        state.lives = 1;
        state.enemies[3].alive = false;
        state.player_shoot();
        state.phase = GamePhase::GameOver;

        state.start(8);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.enemies.len(), 50);
        assert!(state.enemies.iter().all(|e| e.alive));
        assert!(state.player_bullets.is_empty());
        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.formation.direction, 1.0);
        assert_eq!(state.formation.base_speed, state.tuning.base_speed_start);
    }
}
