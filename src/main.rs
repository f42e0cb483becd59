//! Coin Drop entry point
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
    use web_sys::{Document, HtmlCanvasElement, PointerEvent};

    use coin_drop::audio::{AudioManager, SoundEffect};
    use coin_drop::renderer::{RenderState, Viewport, build_scene};
    use coin_drop::sim::GameEvent;
    use coin_drop::{Session, Settings};

    /// DOM ids the page is expected to provide
    const HUD_IDS: [&str; 5] = ["score", "attempts", "game-over", "final-score", "restart-btn"];

    /// Game instance holding all state
    struct Game {
        session: Session,
        settings: Settings,
        render_state: Option<RenderState>,
        audio: AudioManager,
        canvas: HtmlCanvasElement,
        /// An animation frame is scheduled
        running: bool,
    }

    impl Game {
        fn new(seed: u64, settings: Settings, canvas: HtmlCanvasElement) -> Self {
            let audio = AudioManager::new(&settings);
            Self {
                session: Session::new(seed),
                settings,
                render_state: None,
                audio,
                canvas,
                running: false,
            }
        }

        /// Pointer position (CSS pixels) to board coordinates
        fn board_pos(&self, event: &PointerEvent) -> Vec2 {
            let viewport = Viewport::fit(
                self.canvas.client_width() as f32,
                self.canvas.client_height() as f32,
            );
            viewport.surface_to_board(Vec2::new(event.offset_x() as f32, event.offset_y() as f32))
        }

        /// One tick, one render, HUD, audio. Returns whether to keep looping.
        fn frame(&mut self) -> bool {
            let outcome = self.session.frame();
            self.render();
            self.update_hud();
            self.play_events(&outcome.events);
            outcome.keep_running
        }

        /// Render the current frame
        fn render(&mut self) {
            let (width, height) = surface_size(&self.canvas);
            let vertices = build_scene(&self.session.state, &self.settings);

            if let Some(ref mut render_state) = self.render_state {
                if width > 0 && height > 0 && (width, height) != render_state.size {
                    self.canvas.set_width(width);
                    self.canvas.set_height(height);
                    render_state.resize(width, height);
                    log::debug!("Canvas resized to {}x{}", width, height);
                }

                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn play_events(&self, events: &[GameEvent]) {
            for effect in events.iter().filter_map(SoundEffect::for_event) {
                self.audio.play(effect);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = self.session.hud();

            set_text(&document, "score", &hud.score.to_string());
            set_text(&document, "attempts", &hud.attempts.to_string());

            if let Some(el) = document.get_element_by_id("game-over") {
                match hud.final_score {
                    Some(score) => {
                        let _ = el.set_attribute("class", "");
                        set_text(&document, "final-score", &score.to_string());
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Canvas backing size in physical pixels
    fn surface_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        (
            (canvas.client_width() as f64 * dpr) as u32,
            (canvas.client_height() as f64 * dpr) as u32,
        )
    }

    fn js_error(context: &str, e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&format!("{}: {}", context, e))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Coin Drop starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }
        for id in HUD_IDS {
            if document.get_element_by_id(id).is_none() {
                log::warn!("Missing #{} element; that part of the HUD is disabled", id);
            }
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (width, height) = surface_size(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        // Store the normalized form so new fields appear with their defaults
        settings.save();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings, canvas.clone())));

        // Initialize WebGPU (falls back to WebGL2)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| js_error("failed to create surface", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| js_error("failed to get adapter", e))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| js_error("GPU setup failed", e))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(&document, game.clone());

        game.borrow().update_hud();
        game.borrow_mut().running = true;
        request_animation_frame(game);

        log::info!("Coin Drop running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer down - start aiming if on the coin
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                // Keep receiving moves and the release outside the canvas
                let _ = canvas_clone.set_pointer_capture(event.pointer_id());

                let mut g = game.borrow_mut();
                g.audio.resume();
                let pos = g.board_pos(&event);
                g.session.pointer.pointer_down(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer move - aim target
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let pos = g.board_pos(&event);
                g.session.pointer.pointer_move(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer cancel - abandon the aim without launching
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().session.pointer.pointer_cancel();
            });
            let _ = canvas
                .add_event_listener_with_callback("pointercancel", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up - launch
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let pos = g.board_pos(&event);
                g.session.pointer.pointer_up(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; game loop stopped");
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let keep_running = game.borrow_mut().frame();

        if keep_running {
            request_animation_frame(game);
        } else {
            game.borrow_mut().running = false;
            log::info!("Game over; loop halted until restart");
        }
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                let resume = {
                    let mut g = game.borrow_mut();
                    let restarted = g.session.restart(seed);
                    if restarted {
                        g.update_hud();
                    }
                    restarted && !std::mem::replace(&mut g.running, true)
                };
                if resume {
                    request_animation_frame(game.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => match arg.parse() {
            Ok(seed) => seed,
            Err(e) => {
                log::error!("Invalid seed {:?}: {}", arg, e);
                std::process::exit(2);
            }
        },
        None => 42,
    };

    log::info!("Coin Drop (native) autoplay, seed {}", seed);
    log::info!("The playable game is the web build - run with `trunk serve`");

    let summary = coin_drop::autoplay::run(seed);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to encode summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
