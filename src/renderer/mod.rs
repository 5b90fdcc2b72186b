//! Canvas 2D rendering
//!
//! Draws the current entity snapshot: starfield, bullets, the living part of
//! the grid, then the ship. Purely cosmetic; nothing here feeds back into the
//! simulation, and the host timestamp is consumed only by the starfield.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Bullet, Enemy, GameState, Player};

const PLAYER_COLOR: &str = "#00f3ff";
const ENEMY_COLOR: &str = "#ff00ea";
const STAR_COLOR: &str = "rgba(255, 255, 255, 0.5)";
const STAR_COUNT: u32 = 30;
/// Vertical starfield drift in pixels per millisecond
const STAR_SCROLL: f64 = 0.05;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    settings: Settings,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement, settings: Settings) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx, settings })
    }

    /// Draw one frame. `time` is the host timestamp in milliseconds.
    pub fn render(&self, state: &GameState, time: f64) {
        self.ctx
            .clear_rect(0.0, 0.0, ARENA_WIDTH as f64, ARENA_HEIGHT as f64);

        if self.settings.effective_starfield() {
            self.draw_starfield(time);
        }

        for bullet in &state.player_bullets {
            self.draw_bullet(bullet, PLAYER_COLOR);
        }
        for bullet in &state.enemy_bullets {
            self.draw_bullet(bullet, ENEMY_COLOR);
        }
        for enemy in &state.enemies {
            self.draw_enemy(enemy);
        }
        self.draw_player(&state.player);
    }

    /// Pseudo-random, pseudo-static stars drifting downward with time
    fn draw_starfield(&self, time: f64) {
        self.ctx.set_fill_style_str(STAR_COLOR);
        for i in 0..STAR_COUNT {
            let x = ((i as f64 * 123.0).sin() * 0.5 + 0.5) * ARENA_WIDTH as f64;
            let y = ((i as f64 * 321.0).cos() * 0.5 + 0.5) * ARENA_HEIGHT as f64;
            let scrolled = (y + time * STAR_SCROLL) % ARENA_HEIGHT as f64;
            self.ctx.fill_rect(x, scrolled, 2.0, 2.0);
        }
    }

    fn draw_player(&self, player: &Player) {
        let (x, y) = (player.pos.x as f64, player.pos.y as f64);
        self.ctx.set_fill_style_str(PLAYER_COLOR);
        // Hull, then cannon
        self.ctx.fill_rect(x, y + 10.0, PLAYER_WIDTH as f64, 10.0);
        self.ctx.fill_rect(x + 15.0, y, 10.0, 10.0);

        if self.settings.effective_glow() {
            self.ctx.set_shadow_blur(15.0);
            self.ctx.set_shadow_color(PLAYER_COLOR);
            self.ctx.fill_rect(x + 15.0, y, 10.0, 10.0);
            self.ctx.set_shadow_blur(0.0);
        }
    }

    fn draw_enemy(&self, enemy: &Enemy) {
        if !enemy.alive {
            return;
        }
        let (x, y) = (enemy.pos.x as f64, enemy.pos.y as f64);
        let size = ENEMY_SIZE as f64;
        self.ctx.set_fill_style_str(ENEMY_COLOR);
        self.ctx.fill_rect(x, y, size, size);

        if self.settings.effective_glow() {
            self.ctx.set_shadow_blur(10.0);
            self.ctx.set_shadow_color(ENEMY_COLOR);
            self.ctx
                .fill_rect(x + 5.0, y + 5.0, size - 10.0, size - 10.0);
            self.ctx.set_shadow_blur(0.0);
        }
    }

    fn draw_bullet(&self, bullet: &Bullet, color: &str) {
        if !bullet.active {
            return;
        }
        self.ctx.set_fill_style_str(color);
        if self.settings.effective_glow() {
            self.ctx.set_shadow_blur(10.0);
            self.ctx.set_shadow_color(color);
        }
        self.ctx.fill_rect(
            bullet.pos.x as f64,
            bullet.pos.y as f64,
            BULLET_WIDTH as f64,
            BULLET_HEIGHT as f64,
        );
        self.ctx.set_shadow_blur(0.0);
    }
}
