//! Energy Bounce entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use energy_bounce::Settings;
    use energy_bounce::consts::NOMINAL_FRAME_MS;
    use energy_bounce::renderer::{Palette, RenderState, scene};
    use energy_bounce::sim::{
        Energy, EnergyMonitor, Event, PhysicsConfig, SimulationState, update,
    };

    /// App instance holding all state
    struct App {
        config: PhysicsConfig,
        state: SimulationState,
        settings: Settings,
        monitor: EnergyMonitor,
        render_state: Option<RenderState>,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl App {
        fn new(window_w: u32, window_h: u32) -> Self {
            let config = PhysicsConfig::default();
            Self {
                state: SimulationState::for_window(&config, window_w, window_h),
                monitor: EnergyMonitor::new(&config),
                settings: Settings::load(),
                config,
                render_state: None,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn scene_size(&self) -> (f32, f32) {
            (self.state.width as f32, self.state.height as f32)
        }

        /// Apply one event and keep the energy monitor in step
        fn handle(&mut self, event: Event) {
            update(&mut self.state, &self.config, event);

            if !event.is_tick() {
                self.monitor.rebase();
                return;
            }
            let total = Energy::measure(&self.state, &self.config).total;
            if let Some(violation) = self.monitor.observe(total) {
                log::warn!("{} ({})", violation, self.state.text);
                self.monitor.rebase();
            }
        }

        /// Advance the simulation to the frame timestamp
        fn update(&mut self, time: f64) {
            let elapsed_ms = if self.last_time > 0.0 {
                (time - self.last_time).max(0.0)
            } else {
                NOMINAL_FRAME_MS
            };
            self.last_time = time;
            self.handle(Event::Tick { elapsed_ms });

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let palette = Palette::for_theme(self.settings.theme);
            let vertices = scene(&self.state, &self.config, &self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices, palette.background) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        let scene_size = render_state.scene_size;
                        render_state.resize(w, h, scene_size);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("diagnostics") {
                if self.settings.show_diagnostics {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&self.state.text));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Resize the canvas to the scene and reconfigure the surface
        fn fit_canvas(&mut self, canvas: &HtmlCanvasElement) {
            let dpr = web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0);
            let style = canvas.style();
            let _ = style.set_property("width", &format!("{}px", self.state.width));
            let _ = style.set_property("height", &format!("{}px", self.state.height));

            let width = (self.state.width * dpr) as u32;
            let height = (self.state.height * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);

            let scene_size = self.scene_size();
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height, scene_size);
            }
        }
    }

    /// Current window size in CSS pixels
    fn window_size() -> (u32, u32) {
        let Some(window) = web_sys::window() else {
            return (0, 0);
        };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (w as u32, h as u32)
    }

    /// Vertical scene coordinate of the first active touch, if any
    fn touch_y(event: &TouchEvent, canvas: &HtmlCanvasElement) -> Option<f64> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some(touch.client_y() as f64 - rect.top())
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Energy Bounce starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (window_w, window_h) = window_size();
        let app = Rc::new(RefCell::new(App::new(window_w, window_h)));
        app.borrow_mut().fit_canvas(&canvas);

        log::info!(
            "Scene {}x{}, ground at {}",
            app.borrow().state.width,
            app.borrow().state.height,
            app.borrow().state.h
        );

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (width, height) = (canvas.width(), canvas.height());
        let scene_size = app.borrow().scene_size();
        let render_state = RenderState::new(surface, &adapter, width, height, scene_size).await;
        app.borrow_mut().render_state = Some(render_state);

        setup_pointer_handlers(&canvas, app.clone());
        setup_touch_handlers(&canvas, app.clone());
        setup_resize(&canvas, app.clone());
        setup_keyboard(app.clone());
        setup_visibility(app.clone());

        request_animation_frame(app);

        log::info!("Energy Bounce running!");
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse down - grab the ground
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pointer = event.offset_y() as f64;
                app.borrow_mut().handle(Event::DragStart { pointer });
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - only moves the ground while a drag is active
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                if a.state.dragging() {
                    let pointer = event.offset_y() as f64;
                    a.handle(Event::DragMove { pointer });
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up / leaving the canvas ends the gesture
        for name in ["mouseup", "mouseleave"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                if a.state.dragging() {
                    a.handle(Event::DragEnd);
                }
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Touch start
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(pointer) = touch_y(&event, &canvas_clone) {
                    app.borrow_mut().handle(Event::DragStart { pointer });
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(pointer) = touch_y(&event, &canvas_clone) {
                    app.borrow_mut().handle(Event::DragMove { pointer });
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end/cancel (no touch point needed)
        for name in ["touchend", "touchcancel"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().handle(Event::DragEnd);
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = window_size();
            let mut a = app.borrow_mut();
            a.handle(Event::Resize { width, height });
            a.fit_canvas(&canvas_clone);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut a = app.borrow_mut();
            let settings_changed = match event.key().as_str() {
                "d" | "D" => {
                    a.settings.show_diagnostics = !a.settings.show_diagnostics;
                    true
                }
                "f" | "F" => {
                    a.settings.show_fps = !a.settings.show_fps;
                    true
                }
                "s" | "S" => {
                    a.settings.squash = !a.settings.squash;
                    true
                }
                "c" | "C" => {
                    a.settings.toggle_theme();
                    log::info!("Theme: {}", a.settings.theme.as_str());
                    true
                }
                "r" | "R" | " " => {
                    a.handle(Event::Drop);
                    false
                }
                _ => false,
            };
            if settings_changed {
                a.settings.save();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_visibility(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut a = app.borrow_mut();
                // Resume with a nominal frame instead of the whole hidden interval
                a.last_time = 0.0;
                if a.state.dragging() {
                    a.handle(Event::DragEnd);
                }
                log::info!("Tab hidden, frame clock reset");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.update(time);
            a.render();
            a.update_hud();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Energy Bounce (native) starting...");
    log::info!("Interactive mode needs the web build - run with `trunk serve`");

    let seconds = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<f64>().ok())
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(5.0);

    run_headless(seconds);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drop the ball in a 1000x800 window and print the readout four times a second
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(seconds: f64) {
    use energy_bounce::consts::NOMINAL_FRAME_MS;
    use energy_bounce::sim::{
        Energy, EnergyMonitor, Event, PhysicsConfig, SimulationState, update,
    };

    const PRINT_EVERY_MS: f64 = 250.0;

    let config = PhysicsConfig::default();
    match serde_json::to_string(&config) {
        Ok(json) => log::info!("Physics: {}", json),
        Err(e) => log::warn!("Could not serialize physics config: {}", e),
    }

    let mut state = SimulationState::for_window(&config, 1000, 800);
    let mut monitor = EnergyMonitor::new(&config);
    let total_ms = seconds * 1000.0;

    println!("t=     0ms {}", state.text);
    let mut elapsed = 0.0;
    let mut next_print = PRINT_EVERY_MS;
    while elapsed < total_ms {
        update(&mut state, &config, Event::Tick { elapsed_ms: NOMINAL_FRAME_MS });
        elapsed += NOMINAL_FRAME_MS;

        let total = Energy::measure(&state, &config).total;
        if let Some(violation) = monitor.observe(total) {
            log::warn!("t={:.0}ms: {}", elapsed, violation);
            monitor.rebase();
        }

        if elapsed >= next_print {
            println!("t={:6.0}ms {}", elapsed, state.text);
            next_print += PRINT_EVERY_MS;
        }
    }

    log::info!("Simulated {:.1} s", elapsed / 1000.0);
}
