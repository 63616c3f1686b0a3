//! Octo Recall entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlButtonElement, HtmlCanvasElement, MouseEvent};

    use octo_recall::renderer::{Renderer, draw_board};
    use octo_recall::sim::{ClickOutcome, Game, Hud};
    use octo_recall::Settings;

    /// Canvas 2D implementation of the drawing adapter
    struct CanvasRenderer {
        ctx: CanvasRenderingContext2d,
    }

    impl Renderer for CanvasRenderer {
        fn draw_tile(&mut self, polygon: &[Vec2], fill: &str, stroke: &str, stroke_width: f32) {
            let Some((first, rest)) = polygon.split_first() else {
                return;
            };
            let ctx = &self.ctx;
            ctx.set_fill_style_str(fill);
            ctx.begin_path();
            ctx.move_to(first.x as f64, first.y as f64);
            for p in rest {
                ctx.line_to(p.x as f64, p.y as f64);
            }
            ctx.close_path();
            ctx.fill();
            ctx.set_stroke_style_str(stroke);
            ctx.set_line_width(stroke_width as f64);
            ctx.stroke();
        }
    }

    /// Host state: the engine plus the surfaces it talks to
    struct Host {
        game: Game,
        renderer: CanvasRenderer,
        // Last HUD pushed to the DOM
        shown: Option<Hud>,
    }

    impl Host {
        /// Push HUD changes to the DOM
        fn update_hud(&mut self) {
            let hud = &self.game.session.hud;
            if self.shown.as_ref() == Some(hud) {
                return;
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("status") {
                let text = hud.status.map(|s| s.to_string()).unwrap_or_default();
                el.set_text_content(Some(&text));
            }

            if let Some(el) = document.get_element_by_id("levelDisplay") {
                el.set_text_content(Some(&format!("Level: {}", hud.level)));
            }

            if let Some(btn) = document
                .get_element_by_id("startButton")
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
            {
                btn.set_disabled(!hud.start_enabled);
            }

            self.shown = Some(hud.clone());
        }
    }

    fn now_ms() -> u64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now() as u64)
            .unwrap_or(0)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Octo Recall starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(&settings, seed);
        log::info!("Game initialized with seed: {}", game.session.seed);

        let mut renderer = CanvasRenderer { ctx };
        draw_board(&mut renderer, &game.board);

        let host = Rc::new(RefCell::new(Host {
            game,
            renderer,
            shown: None,
        }));
        host.borrow_mut().update_hud();

        setup_start_button(host.clone());
        setup_click_handler(&canvas, host.clone());

        request_animation_frame(host);

        log::info!("Octo Recall running!");
    }

    fn setup_start_button(host: Rc<RefCell<Host>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("startButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut h = host.borrow_mut();
                let Host { game, renderer, .. } = &mut *h;
                if let Err(e) = game.start(now_ms(), renderer) {
                    log::debug!("Start ignored: {}", e);
                }
                h.update_hud();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_click_handler(canvas: &HtmlCanvasElement, host: Rc<RefCell<Host>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            // Client pixels -> canvas pixels (the board's coordinate space)
            let rect = canvas_clone.get_bounding_client_rect();
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                return;
            }
            let sx = canvas_clone.width() as f64 / rect.width();
            let sy = canvas_clone.height() as f64 / rect.height();
            let x = (event.client_x() as f64 - rect.left()) * sx;
            let y = (event.client_y() as f64 - rect.top()) * sy;

            let mut h = host.borrow_mut();
            let Host { game, renderer, .. } = &mut *h;
            let outcome = game.click(now_ms(), Vec2::new(x as f32, y as f32), renderer);
            if outcome != ClickOutcome::Ignored {
                log::debug!("Click at ({:.0}, {:.0}): {:?}", x, y, outcome);
            }
            h.update_hud();
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(host, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(host: Rc<RefCell<Host>>, time: f64) {
        {
            let mut h = host.borrow_mut();
            let Host { game, renderer, .. } = &mut *h;
            game.advance(time as u64, renderer);
            h.update_hud();
        }

        request_animation_frame(host);
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

/// Rounds the scripted native player clears before it misses on purpose
#[cfg(not(target_arch = "wasm32"))]
const SCRIPTED_ROUNDS: usize = 5;

/// Time the scripted player takes per click (ms)
#[cfg(not(target_arch = "wasm32"))]
const SCRIPTED_CLICK_MS: u64 = 250;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use octo_recall::Settings;
    use octo_recall::renderer::RecordingRenderer;
    use octo_recall::sim::{Game, GamePhase};

    env_logger::init();
    log::info!("Octo Recall (native) starting...");
    log::info!("Native mode runs a scripted headless game - use `trunk serve` for the web version");

    let path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let settings = Settings::load_from(path.as_deref());
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut game = Game::new(&settings, seed);
    let mut renderer = RecordingRenderer::new();
    let mut now = 0;
    let mut last_status = None;

    if let Err(e) = game.start(now, &mut renderer) {
        log::error!("Could not start: {}", e);
        return;
    }

    loop {
        match game.phase() {
            GamePhase::Input => {
                let Some(expected) = game.session.expected_next() else {
                    break;
                };
                let last_step = game.session.progress.len() + 1 == game.session.level();
                let tile = if game.session.level() > SCRIPTED_ROUNDS && last_step {
                    (expected + 1) % game.board.len()
                } else {
                    expected
                };
                let point = game.board.tiles[tile].centroid();
                let outcome = game.click(now, point, &mut renderer);
                log::info!("t={}ms click tile {} -> {:?}", now, tile, outcome);
                now += SCRIPTED_CLICK_MS;
            }
            GamePhase::GameOver | GamePhase::Idle => break,
            GamePhase::Playback => match game.next_due() {
                Some(due) => {
                    now = now.max(due);
                    game.advance(now, &mut renderer);
                }
                None => break,
            },
        }

        // Let any flash reverts due by now land before reporting
        game.advance(now, &mut renderer);
        if game.session.hud.status != last_status {
            last_status = game.session.hud.status;
            if let Some(status) = last_status {
                log::info!("t={}ms [level {}] {}", now, game.session.hud.level, status);
            }
        }
    }

    if let Ok(json) = serde_json::to_string(&game.session) {
        log::debug!("Final session: {}", json);
    }
    println!(
        "{} ({} tiles drawn, {} flashes)",
        game.session
            .hud
            .status
            .map(|s| s.to_string())
            .unwrap_or_default(),
        renderer.calls.len(),
        renderer.flashes().count()
    );
}
