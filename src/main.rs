//! Mirror Cavity entry point
//!
//! Web: drives the engine from `requestAnimationFrame` and draws on a canvas.
//! Native: runs the engine headless and logs the dashboard after each tick.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlInputElement};

    use mirror_cavity::input::{DimensionField, apply_dimension_input};
    use mirror_cavity::renderer::{CanvasTarget, render_frame};
    use mirror_cavity::sim::default_origin;
    use mirror_cavity::{RayTracerEngine, Settings};

    /// Viewer instance holding all state
    struct App {
        engine: RayTracerEngine,
        target: CanvasTarget,
        settings: Settings,
        last_time: f64,
        /// Scene changed since the last draw
        dirty: bool,
    }

    impl App {
        /// Run due ticks, then redraw if anything changed
        fn frame(&mut self, time: f64) {
            let elapsed = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;

            match self.engine.advance(elapsed) {
                Ok(0) => {}
                Ok(_) => self.dirty = true,
                Err(e) => {
                    // Ticks earlier in the batch may have moved the scene
                    log::error!("Tick failed, stopping loop: {e}");
                    self.engine.stop_loop();
                    self.dirty = true;
                }
            }

            if self.dirty {
                render_frame(self.engine.scene(), &mut self.target);
                self.update_dashboard();
                self.dirty = false;
            }
        }

        fn update_dashboard(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            for (id, text) in self.engine.dashboard().fields() {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(text));
                }
            }
        }

        fn on_dimension_input(&mut self, field: DimensionField, raw: &str) {
            match apply_dimension_input(&mut self.engine, field, raw) {
                Ok(true) => {
                    self.settings.dimensions = self.engine.dimensions();
                    self.settings.save();
                    self.dirty = true;
                }
                Ok(false) => {}
                Err(e) => log::error!("Reset failed: {e}"),
            }
        }

        fn play(&mut self) {
            if let Err(e) = self.engine.start_loop(self.settings.interval_ms) {
                log::warn!("Cannot start loop: {e}");
            }
        }

        fn pause(&mut self) {
            self.engine.stop_loop();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Mirror Cavity starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("ray-viewer")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let target = CanvasTarget::new(&canvas, settings.canvas_width, settings.canvas_height)
            .expect("Failed to get canvas context");
        let mut engine = RayTracerEngine::initialize(settings.dimensions, default_origin())
            .expect("Failed to initialize engine");
        if settings.autoplay {
            if let Err(e) = engine.start_loop(settings.interval_ms) {
                log::warn!("Cannot start loop: {e}");
            }
        }

        let app = Rc::new(RefCell::new(App {
            engine,
            target,
            settings,
            last_time: 0.0,
            dirty: true,
        }));

        setup_dimension_inputs(app.clone());
        setup_playback_buttons(app.clone());

        request_animation_frame(app);

        log::info!("Mirror Cavity running!");
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            app.borrow_mut().frame(time);
            request_animation_frame(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_dimension_inputs(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for field in [DimensionField::Length, DimensionField::Thickness] {
            let Some(el) = document.get_element_by_id(field.input_id()) else {
                log::warn!("Missing input #{}", field.input_id());
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let Some(input) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                else {
                    return;
                };
                app.borrow_mut().on_dimension_input(field, &input.value());
            });
            let _ = el.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_playback_buttons(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("btn-play") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().play();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("btn-pause") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().pause();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Ticks run by the native runner when no count is given (one full sweep)
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_NATIVE_TICKS: u32 = 240;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Mirror Cavity (native) starting...");

    if let Err(e) = run_headless() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

/// Usage: `mirror-cavity [settings.json] [ticks]`
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() -> Result<(), mirror_cavity::EngineError> {
    use mirror_cavity::renderer::{CommandList, render_frame};
    use mirror_cavity::sim::default_origin;
    use mirror_cavity::{RayTracerEngine, Settings};

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().map(std::path::PathBuf::from);
    let ticks = match args.next() {
        Some(raw) => raw.parse::<u32>().unwrap_or_else(|e| {
            log::warn!("Invalid tick count {raw:?} ({e}), using {DEFAULT_NATIVE_TICKS}");
            DEFAULT_NATIVE_TICKS
        }),
        None => DEFAULT_NATIVE_TICKS,
    };

    let settings = Settings::load_from(settings_path.as_deref())?;
    if log::log_enabled!(log::Level::Debug) {
        log::debug!("Settings: {}", settings.to_json()?);
    }
    let mut engine = RayTracerEngine::initialize(settings.dimensions, default_origin())?;
    engine.start_loop(settings.interval_ms)?;

    let mut frame = CommandList::new();
    let interval = f64::from(settings.interval_ms);
    for _ in 0..ticks {
        engine.advance(interval)?;
        render_frame(engine.scene(), &mut frame);
        println!(
            "{} | {} segments, {} draw commands",
            engine.dashboard(),
            engine.scene().bounce_count(),
            frame.len()
        );
    }

    engine.stop_loop();
    Ok(())
}
