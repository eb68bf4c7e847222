//! Flappy entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent, Window};

    use flappy::audio::WebAudio;
    use flappy::renderer::RenderState;
    use flappy::sim::{Action, GamePhase, Surface};
    use flappy::{Game, Profile, Settings, Tuning};

    /// Canvas never grows taller than this share of the window
    const MAX_HEIGHT_RATIO: f64 = 0.8;
    /// Canvas height cap relative to its width
    const MAX_ASPECT: f64 = 1.5;

    /// Game instance holding all state
    struct App {
        game: Game<WebAudio>,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        settings: Settings,
    }

    impl App {
        /// Surface size for this frame, taken from the canvas backing store
        fn surface(&self) -> Surface {
            Surface::new(self.canvas.width() as f32, self.canvas.height() as f32)
        }

        /// Map a tap/space press to the action it means in the current phase
        fn primary_action(&self) -> Action {
            match self.game.phase() {
                GamePhase::Initial | GamePhase::Ended => Action::Start,
                GamePhase::Running | GamePhase::Paused => Action::Jump,
            }
        }

        fn press(&mut self, at_ms: f64) {
            // Browsers only let audio start inside a user gesture
            self.game.audio().sink().resume();
            let action = self.primary_action();
            self.game.push_action(action, at_ms);
        }

        /// Render the current frame
        fn render(&mut self) {
            let snapshot = self.game.snapshot();
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(self.canvas.width(), self.canvas.height());
                match render_state.render(&snapshot) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        render_state.config.width = w;
                        render_state.config.height = h;
                        render_state
                            .surface
                            .configure(&render_state.device, &render_state.config);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let snapshot = self.game.snapshot();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&snapshot.score.to_string()));
            }

            if let Some(el) = document.query_selector("#hud-level .hud-value").ok().flatten() {
                el.set_text_content(Some(&snapshot.level.to_string()));
            }

            if let Some(el) = document.get_element_by_id("level-progress") {
                let pct = (snapshot.level_progress * 100.0).round();
                let _ = el.set_attribute("style", &format!("width: {}%", pct));
            }

            set_visible(document, "start-prompt", snapshot.phase == GamePhase::Initial);
            set_visible(document, "pause-menu", snapshot.phase == GamePhase::Paused);

            let ended = snapshot.phase == GamePhase::Ended;
            set_visible(document, "game-over", ended);
            if ended {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&snapshot.score.to_string()));
                }
                if let Some(el) = document.get_element_by_id("final-level") {
                    el.set_text_content(Some(&snapshot.level.to_string()));
                }
            }

            if let Some(btn) = document.get_element_by_id("pause-btn") {
                let label = if snapshot.phase == GamePhase::Paused {
                    "Resume"
                } else {
                    "Pause"
                };
                btn.set_text_content(Some(label));
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Size the canvas to its container, capped by window height and aspect
    fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) {
        let inner_w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let inner_h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let width = canvas
            .parent_element()
            .map(|p| p.client_width() as f64)
            .filter(|w| *w > 0.0)
            .unwrap_or(inner_w);
        let height = (inner_h * MAX_HEIGHT_RATIO).min(width * MAX_ASPECT);

        canvas.set_width(width.max(0.0) as u32);
        canvas.set_height(height.max(0.0) as u32);
        log::debug!("Canvas resized to {}x{}", canvas.width(), canvas.height());
    }

    /// Settings JSON embedded in the page, if any
    fn load_settings(document: &Document) -> Settings {
        let Some(json) = document
            .get_element_by_id("flappy-settings")
            .and_then(|el| el.text_content())
        else {
            return Settings::default();
        };
        match Settings::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from page");
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings JSON ({}), using defaults", e);
                Settings::default()
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Flappy starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element on the page");
            return;
        };
        fit_canvas(&window, &canvas);

        let settings = load_settings(&document);
        let detected = window
            .navigator()
            .user_agent()
            .map(|ua| Profile::from_user_agent(&ua))
            .unwrap_or_default();
        let profile = settings.effective_profile(detected);
        let tuning = settings.tuning(detected);
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!("Profile: {}, seed: {}", profile.as_str(), seed);

        let mut audio = WebAudio::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);

        let mut game = Game::new(seed, tuning, &settings, audio);
        game.start();

        let app = Rc::new(RefCell::new(App {
            game,
            render_state: None,
            canvas: canvas.clone(),
            settings,
        }));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, canvas.width(), canvas.height()).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        setup_input_handlers(&window, &canvas, app.clone());
        setup_pause_button(&document, app.clone());
        setup_resize(&window, &canvas);
        setup_auto_pause(&window, app.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(app);

        log::info!("Flappy running!");
    }

    fn setup_input_handlers(window: &Window, canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Touch start
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().press(event.time_stamp());
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut().press(event.time_stamp());
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let at_ms = event.time_stamp();
                let mut a = app.borrow_mut();
                match event.key().as_str() {
                    " " | "Shift" => {
                        event.prevent_default();
                        a.press(at_ms);
                    }
                    "p" | "P" => a.game.push_action(Action::TogglePause, at_ms),
                    "r" | "R" if a.game.phase() == GamePhase::Ended => {
                        a.game.push_action(Action::Start, at_ms);
                    }
                    "d" | "D" => {
                        let enabled = !a.game.demo_mode();
                        a.game.set_demo_mode(enabled);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pause_button(document: &Document, app: Rc<RefCell<App>>) {
        if let Some(btn) = document.get_element_by_id("pause-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                // Keep the click from also reaching the canvas as a jump
                event.stop_propagation();
                app.borrow_mut()
                    .game
                    .push_action(Action::TogglePause, event.time_stamp());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &Window, canvas: &HtmlCanvasElement) {
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(window) = web_sys::window() {
                fit_canvas(&window, &canvas);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(window: &Window, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::FocusEvent| {
            let mut a = app.borrow_mut();
            if a.settings.pause_on_blur && a.game.phase() == GamePhase::Running {
                a.game.push_action(Action::Pause, event.time_stamp());
                log::info!("Auto-paused (window blur)");
            }
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let keep_going = {
            let mut a = app.borrow_mut();
            let surface = a.surface();
            let keep_going = a.game.frame(time, surface);
            a.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                a.update_hud(&document);
            }
            keep_going
        };

        if keep_going {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy::audio::LogSink;
    use flappy::sim::{GameEvent, Surface};
    use flappy::{Game, Profile, Settings, Tuning};

    /// Headless run length when no frame count is given
    const DEFAULT_FRAMES: u32 = 3600;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    env_logger::init();
    log::info!("Flappy (native) starting...");
    log::info!("Native mode runs the autopilot headless - use `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let frames = args
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut settings = match std::env::var("FLAPPY_SETTINGS") {
        Ok(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Settings::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Invalid settings in {} ({}), using defaults", path, e);
                Settings::default()
            }),
            Err(e) => {
                log::warn!("Could not read {} ({}), using defaults", path, e);
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    };
    settings.demo_mode = true;

    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .or(settings.seed)
        .unwrap_or(1);
    let tuning = match std::env::var("FLAPPY_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path).map(|json| Tuning::from_json(&json)) {
            Ok(Ok(tuning)) => tuning,
            Ok(Err(e)) => {
                log::warn!("Invalid tuning in {} ({}), using profile defaults", path, e);
                settings.tuning(Profile::Desktop)
            }
            Err(e) => {
                log::warn!("Could not read {} ({}), using profile defaults", path, e);
                settings.tuning(Profile::Desktop)
            }
        },
        Err(_) => settings.tuning(Profile::Desktop),
    };
    let surface = Surface::new(480.0, 640.0);

    let mut game = Game::new(seed, tuning, &settings, LogSink::default());
    game.start();

    let mut runs = 0u32;
    let mut best = 0u32;
    for i in 0..frames {
        game.frame(f64::from(i) * FRAME_MS, surface);
        for event in game.frame_events() {
            if let GameEvent::GameOver { score, .. } = event {
                runs += 1;
                best = best.max(*score);
            }
        }
    }
    game.stop();

    println!("{} frames, {} finished runs, best score {}", frames, runs, best);
    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
