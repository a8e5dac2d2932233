//! Canvas Arcade entry point
//!
//! In the browser this drives one game on the page's canvas. Natively it
//! runs the headless simulator.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use thiserror::Error;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use canvas_arcade::hud::HudUpdate;
    use canvas_arcade::renderer::{RenderError, RenderState};
    use canvas_arcade::{EndScreen, GameKind, Session, Tuning};

    const CANVAS_ID: &str = "gameCanvas";
    const TUNING_ID: &str = "tuning";
    const GAME_OVER_ID: &str = "game-over";
    const RESTART_BUTTON_ID: &str = "restartButton";

    #[derive(Debug, Error)]
    enum ShellError {
        #[error("missing DOM node: {0}")]
        Dom(&'static str),
        #[error(transparent)]
        Render(#[from] RenderError),
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        render_state: Option<RenderState>,
        document: Document,
        /// Frozen on the end screen until the restart button is clicked
        awaiting_restart: bool,
        has_restart_button: bool,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            if !self.awaiting_restart {
                let output = self.session.frame(time);
                apply_hud(&self.document, &output.hud);
                if let Some(message) = output.game_over {
                    log::info!("{}", message);
                    self.show_game_over(&message);
                    if self.has_restart_button {
                        self.awaiting_restart = true;
                    } else {
                        self.restart(js_sys::Date::now() as u64);
                    }
                }
            }
            self.render();
        }

        fn render(&mut self) {
            let vertices = self.session.vertices();
            let clear = self.session.clear_color();
            if let Some(rs) = &mut self.render_state {
                match rs.render(&vertices, clear) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let (w, h) = rs.size;
                        rs.resize(w, h);
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn show_game_over(&self, message: &str) {
            let overlay = self.document.get_element_by_id(GAME_OVER_ID);
            match (EndScreen::choose(overlay.is_some(), self.has_restart_button), overlay) {
                (EndScreen::Overlay, Some(el)) => {
                    el.set_text_content(Some(message));
                    let _ = el.set_attribute("class", "");
                }
                _ => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.alert_with_message(message);
                    }
                }
            }
        }

        fn restart(&mut self, seed: u64) {
            self.session.restart(seed);
            self.awaiting_restart = false;
            if let Some(el) = self.document.get_element_by_id(GAME_OVER_ID) {
                let _ = el.set_attribute("class", "hidden");
            }
            apply_hud(&self.document, &self.session.hud(0.0));
        }
    }

    fn apply_hud(document: &Document, updates: &[HudUpdate]) {
        for update in updates {
            let Some(el) = document.get_element_by_id(update.id()) else {
                continue;
            };
            match update {
                HudUpdate::Text { text, .. } => {
                    if el.text_content().as_deref() != Some(text.as_str()) {
                        el.set_text_content(Some(text));
                    }
                }
                HudUpdate::Width { percent, .. } => {
                    if let Ok(el) = el.dyn_into::<HtmlElement>() {
                        let _ = el.style().set_property("width", &format!("{percent}%"));
                    }
                }
            }
        }
    }

    /// Page tuning from `<script id="tuning" type="application/json">`
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id(TUNING_ID)
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded page tuning");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring page tuning: {}", e);
                Tuning::default()
            }
        }
    }

    fn game_kind(canvas: &HtmlCanvasElement) -> GameKind {
        match canvas.get_attribute("data-game") {
            None => GameKind::Runner,
            Some(name) => name.parse().unwrap_or_else(|e| {
                log::warn!("{}; starting the runner", e);
                GameKind::Runner
            }),
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        if let Err(e) = start().await {
            log::error!("Canvas Arcade failed to start: {}", e);
        }
    }

    async fn start() -> Result<(), ShellError> {
        let window = web_sys::window().ok_or(ShellError::Dom("window"))?;
        let document = window.document().ok_or(ShellError::Dom("document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .and_then(|el| el.dyn_into().ok())
            .ok_or(ShellError::Dom("canvas#gameCanvas"))?;

        let kind = game_kind(&canvas);
        let tuning = load_tuning(&document);
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(kind, seed, &tuning);
        let (logical_w, logical_h) = session.canvas_size();
        log::info!("Starting {} with seed {}", kind, seed);

        // Keep the page's backbuffer size; scenes scale to it
        if canvas.width() == 0 || canvas.height() == 0 {
            canvas.set_width(logical_w as u32);
            canvas.set_height(logical_h as u32);
        }
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(RenderError::from)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(RenderError::from)?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            glam::Vec2::new(logical_w, logical_h),
        )
        .await?;

        apply_hud(&document, &session.hud(0.0));
        let has_restart_button = document.get_element_by_id(RESTART_BUTTON_ID).is_some();
        let game = Rc::new(RefCell::new(Game {
            session,
            render_state: Some(render_state),
            document,
            awaiting_restart: false,
            has_restart_button,
        }));

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());
        request_animation_frame(game);

        log::info!("Canvas Arcade running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if game.borrow_mut().session.keys.dom_key_down(&key)
                    && matches!(key.as_str(), " " | "ArrowUp" | "ArrowDown")
                {
                    // Keep the page from scrolling
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().session.keys.dom_key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyup never arrives once focus is gone
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().session.keys.release_all();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(RESTART_BUTTON_ID))
        else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            game.borrow_mut().restart(js_sys::Date::now() as u64);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = run_headless() {
        log::error!("{}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn run_headless() -> Result<(), canvas_arcade::headless::HeadlessError> {
    use canvas_arcade::headless::{HeadlessConfig, USAGE, run};

    let config = HeadlessConfig::from_args()?;
    if config.help {
        println!("{USAGE}");
        return Ok(());
    }
    let tuning = config.load_tuning()?;
    let summary = run(&config, &tuning);
    println!("{}", summary.to_json()?);
    Ok(())
}
