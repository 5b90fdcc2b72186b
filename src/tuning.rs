//! Data-driven game balance
//!
//! Everything that shapes the difficulty curve lives here so tests (and a
//! future balance pass) can adjust it without touching the simulation.

use serde::{Deserialize, Serialize};

/// Balance knobs for a single session. Owned by the session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Formation grid shape
    pub enemy_rows: u32,
    pub enemy_cols: u32,
    /// Formation speed when the full grid is alive
    pub base_speed_start: f32,
    /// Added to the base speed every time the formation hits an edge
    pub base_speed_increment: f32,
    /// Ceiling for the base speed
    pub base_speed_max: f32,
    /// Ceiling for the inverse-proportional speed multiplier
    pub speed_multiplier_cap: f32,
    /// Per-frame probability that the formation fires one bullet
    pub enemy_fire_chance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            enemy_rows: 5,
            enemy_cols: 10,
            // Start slow to compensate for the inverse ratio
            base_speed_start: 0.5,
            base_speed_increment: 0.05,
            base_speed_max: 3.0,
            speed_multiplier_cap: 6.0,
            enemy_fire_chance: 0.02,
        }
    }
}

impl Tuning {
    /// Total grid size; the numerator of the inverse speed ratio
    pub fn max_enemies(&self) -> u32 {
        self.enemy_rows * self.enemy_cols
    }
}
