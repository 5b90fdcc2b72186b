//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Frame-coupled updates only (no wall-clock time)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod combat;
pub mod formation;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use state::{Bullet, Enemy, Formation, GamePhase, GameState, Player};
pub use tick::{TickInput, tick};
