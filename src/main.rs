//! Neon Invaders entry point
//!
//! Handles platform-specific initialization and runs the frame loop. The
//! browser host owns input capture, the HUD and frame scheduling; the
//! simulation itself lives in `neon_invaders::sim`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use neon_invaders::consts::*;
    use neon_invaders::renderer::CanvasRenderer;
    use neon_invaders::sim::{GamePhase, GameState, TickInput, tick};
    use neon_invaders::{Settings, Tuning, ui};

    /// Host-side session wrapper
    struct Game {
        state: GameState,
        renderer: Option<CanvasRenderer>,
        input: TickInput,
        /// Space held, so fire stays edge-triggered across key repeat
        space_held: bool,
        last_time: f64,
        /// Previous phase, to signal the screen overlays once per transition
        last_phase: GamePhase,
        /// Whether a frame callback is currently scheduled
        loop_running: bool,
        show_fps: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed, Tuning::default()),
                renderer: None,
                input: TickInput::default(),
                space_held: false,
                last_time: 0.0,
                last_phase: GamePhase::Start,
                loop_running: false,
                show_fps: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn track_frame(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 {
                let elapsed = time - oldest;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Invaders starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(ARENA_WIDTH as u32);
        canvas.set_height(ARENA_HEIGHT as u32);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        {
            let mut g = game.borrow_mut();
            g.show_fps = settings.show_fps;
            let renderer =
                CanvasRenderer::new(&canvas, settings).expect("Failed to create renderer");
            g.renderer = Some(renderer);

            // Attract screen: one static frame behind the start overlay
            if let Some(ref renderer) = g.renderer {
                renderer.render(&g.state, 0.0);
            }
            ui::update_hud(&g.state);
            ui::show_phase_screens(&g.state);
        }

        setup_input_handlers(game.clone());
        setup_session_buttons(game.clone());

        log::info!("Neon Invaders ready (seed {})", seed);
    }

    /// Issue the start/restart command and (re)arm the frame loop
    fn start_session(game: &Rc<RefCell<Game>>) {
        let seed = js_sys::Date::now() as u64;
        let arm = {
            let mut g = game.borrow_mut();
            g.state.start(seed);
            g.input = TickInput::default();
            g.last_phase = GamePhase::Playing;
            g.last_time = 0.0;
            ui::update_hud(&g.state);
            ui::show_phase_screens(&g.state);
            log::info!("Session started with seed: {}", seed);

            let arm = !g.loop_running;
            g.loop_running = true;
            arm
        };
        if arm {
            request_animation_frame(game.clone());
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keydown: held directional flags; fire only on the Space transition
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "ArrowLeft" => g.input.left = true,
                    "ArrowRight" => g.input.right = true,
                    "Space" => {
                        if !g.space_held {
                            g.input.fire = true;
                        }
                        g.space_held = true;
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyup
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "ArrowLeft" => g.input.left = false,
                    "ArrowRight" => g.input.right = false,
                    "Space" => g.space_held = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_session_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for id in ["start-btn", "restart-btn", "play-again-btn"] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                // Blur the button so a following Space press doesn't
                // re-click it
                if let Some(target) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlElement>().ok())
                {
                    let _ = target.blur();
                }
                start_session(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            g.last_time = time;

            let input = g.input;
            let keep_going = tick(&mut g.state, &input);
            // Clear one-shot inputs after processing
            g.input.fire = false;

            g.track_frame(time);
            if let Some(ref renderer) = g.renderer {
                renderer.render(&g.state, time);
            }
            ui::update_hud(&g.state);
            if g.show_fps {
                ui::update_fps(g.fps);
            }

            // Terminal transitions surface exactly once
            if g.state.phase != g.last_phase {
                g.last_phase = g.state.phase;
                ui::show_phase_screens(&g.state);
                match g.state.phase {
                    GamePhase::GameOver => {
                        log::info!("Game over, final score {}", g.state.score)
                    }
                    GamePhase::Victory => {
                        log::info!("Victory, final score {}", g.state.score)
                    }
                    _ => {}
                }
            }

            if !keep_going {
                g.loop_running = false;
            }
            keep_going
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_invaders::Tuning;
    use neon_invaders::sim::{GameState, TickInput, tick};

    env_logger::init();
    log::info!("Neon Invaders (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 for the playable version");

    // Headless demo: sweep the ship side to side and fire on a cadence
    // until the session reaches a terminal state.
    let mut state = GameState::new(0x4e30_4e21, Tuning::default());
    state.start(state.seed);

    let mut frames = 0u64;
    // 10 minutes of simulated play is far past either terminal state
    while frames < 36_000 {
        let sweep_right = (frames / 120) % 2 == 0;
        let input = TickInput {
            left: !sweep_right,
            right: sweep_right,
            fire: frames % 15 == 0,
        };
        if !tick(&mut state, &input) {
            break;
        }
        frames += 1;
    }

    log::info!(
        "Demo finished after {} frames: {:?}, score {}, lives {}, {} enemies left",
        frames,
        state.phase,
        state.score,
        state.lives,
        state.alive_count()
    );
}
