//! DOM HUD and session screens
//!
//! Score/lives readouts plus the start, game-over and victory overlays.
//! Missing DOM nodes are ignored; the UI never fails the frame.

use web_sys::Document;

use crate::sim::{GamePhase, GameState};

/// Write score and lives into the HUD
pub fn update_hud(state: &GameState) {
    let Some(document) = document() else {
        return;
    };
    set_text(&document, "score", &state.score.to_string());
    set_text(&document, "lives", &state.lives.to_string());
}

/// Write the FPS readout (only wired when the settings enable it)
pub fn update_fps(fps: u32) {
    let Some(document) = document() else {
        return;
    };
    set_text(&document, "fps", &fps.to_string());
}

/// Reflect the current phase in the overlay screens, including the final
/// score on the terminal ones. The host calls this once per phase transition.
pub fn show_phase_screens(state: &GameState) {
    let Some(document) = document() else {
        return;
    };
    set_screen(&document, "start-screen", state.phase == GamePhase::Start);
    set_screen(
        &document,
        "game-over-screen",
        state.phase == GamePhase::GameOver,
    );
    set_screen(&document, "victory-screen", state.phase == GamePhase::Victory);

    match state.phase {
        GamePhase::GameOver => set_text(&document, "final-score", &state.score.to_string()),
        GamePhase::Victory => set_text(&document, "victory-score", &state.score.to_string()),
        _ => {}
    }
}

fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

fn set_screen(document: &Document, id: &str, active: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let classes = el.class_list();
        if active {
            let _ = classes.add_1("active");
        } else {
            let _ = classes.remove_1("active");
        }
    }
}
