//! Neon Invaders - a fixed shooter against a marching enemy grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, formation, collisions, session state)
//! - `renderer`: Canvas 2D rendering (wasm32 only)
//! - `ui`: DOM HUD and session screens (wasm32 only)
//! - `tuning`: Data-driven game balance
//! - `settings`: Display preferences

pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod renderer;
#[cfg(target_arch = "wasm32")]
pub mod ui;

pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;
    /// Horizontal movement per frame (frame-coupled, not time-based)
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Gap between the ship and the bottom arena edge at spawn
    pub const PLAYER_BOTTOM_GAP: f32 = 20.0;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 30.0;
    /// Horizontal inset the formation is not allowed to cross
    pub const EDGE_MARGIN: f32 = 20.0;
    /// Vertical drop applied to the whole grid on an edge hit
    pub const DESCENT_STEP: f32 = 30.0;
    /// Enemies past `ARENA_HEIGHT - DEFENSE_LINE_MARGIN` end the session
    pub const DEFENSE_LINE_MARGIN: f32 = 100.0;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 15.0;
    /// Upward, so negative
    pub const PLAYER_BULLET_SPEED: f32 = -14.0;
    pub const ENEMY_BULLET_SPEED: f32 = 4.0;
    /// Concurrent live bullet caps
    pub const MAX_PLAYER_BULLETS: usize = 2;
    pub const MAX_ENEMY_BULLETS: usize = 3;

    /// Formation grid spacing
    pub const GRID_SPACING_X: f32 = 60.0;
    pub const GRID_SPACING_Y: f32 = 50.0;
    pub const GRID_OFFSET_Y: f32 = 50.0;

    /// Score for each destroyed enemy
    pub const KILL_SCORE: u32 = 100;
    pub const STARTING_LIVES: u8 = 3;
}
