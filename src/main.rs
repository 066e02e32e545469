//! Grid Snake entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use grid_snake::persistence::LocalStorageStore;
    use grid_snake::platform::map_key;
    use grid_snake::renderer::{RenderOptions, RenderState, Viewport, render};
    use grid_snake::sim::Grid;
    use grid_snake::{Controller, Hud, RenderRequest, Settings};

    /// Game instance holding all state
    struct Game {
        controller: Controller<LocalStorageStore>,
        render_state: Option<RenderState>,
        viewport: Viewport,
        options: RenderOptions,
        // Last HUD pushed to the DOM
        hud: Option<Hud>,
    }

    impl Game {
        /// Draw the board, with the overlay if requested
        fn draw(&mut self, request: RenderRequest) {
            let vertices = render(
                self.controller.state(),
                &self.viewport,
                &self.options,
                request.overlay,
            );
            if let Some(ref mut render_state) = self.render_state {
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

        /// Update HUD elements in DOM when they change
        fn update_hud(&mut self) {
            let hud = self.controller.hud();
            if self.hud.as_ref() == Some(&hud) {
                return;
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            for (id, text) in [("score", &hud.score), ("best", &hud.best), ("speed", &hud.speed)] {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(text.as_str()));
                }
            }
            self.hud = Some(hud);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Grid Snake starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();

        // Grid is laid out in CSS pixels; the backing store is scaled for crisp tiles
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(0) as u32;
        let client_h = canvas.client_height().max(0) as u32;
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let grid = Grid::from_canvas(client_w, client_h, settings.tile_size);
        let viewport = Viewport::new(
            width as f32,
            height as f32,
            settings.tile_size as f32,
            dpr as f32,
        );
        let options = RenderOptions {
            show_grid: settings.show_grid,
        };

        let seed = js_sys::Date::now() as u64;
        let controller = Controller::new(settings, grid, LocalStorageStore::new(), seed);

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

        let render_state = match RenderState::new(surface, &adapter, width, height).await {
            Ok(state) => Some(state),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                None
            }
        };

        let game = Rc::new(RefCell::new(Game {
            controller,
            render_state,
            viewport,
            options,
            hud: None,
        }));

        {
            let mut g = game.borrow_mut();
            g.draw(RenderRequest::BOARD);
            g.update_hud();
        }

        setup_input_handlers(game.clone());
        setup_auto_pause(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Grid Snake running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let Some(command) = map_key(&event.key()) else {
                return;
            };
            // Keep arrows from scrolling the page
            event.prevent_default();

            let mut g = game.borrow_mut();
            if let Some(request) = g.controller.handle_key(command) {
                g.draw(request);
                g.update_hud();
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if let Some(request) = g.controller.suspend() {
                        log::info!("Auto-paused (tab hidden)");
                        g.draw(request);
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if let Some(request) = g.controller.suspend() {
                    log::info!("Auto-paused (window blur)");
                    g.draw(request);
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
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
        {
            let mut g = game.borrow_mut();
            let report = g.controller.on_frame(time);
            if let Some(request) = report.redraw {
                g.draw(request);
            }
            g.update_hud();
        }

        // Always reschedule so resume and restart stay responsive
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
    log::info!("Grid Snake (native) starting...");
    log::info!("Native mode runs a headless demo game - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(1);
    demo::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: the autopilot plays one game at 60 frames per second of simulated time
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use grid_snake::persistence::MemoryStore;
    use grid_snake::platform::KeyCommand;
    use grid_snake::sim::{GamePhase, Grid};
    use grid_snake::{Controller, Settings};

    /// Canvas size of the web build, in CSS pixels
    const CANVAS_SIZE: (u32, u32) = (400, 400);
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    pub fn run(seed: u64) {
        let settings = Settings::load();
        let grid = Grid::from_canvas(CANVAS_SIZE.0, CANVAS_SIZE.1, settings.tile_size);
        let mut controller = Controller::new(settings, grid, MemoryStore::new(), seed);
        controller.handle_key(KeyCommand::ToggleAutopilot);

        let mut last_score = 0;
        let mut frames = 0;
        while controller.phase() != GamePhase::GameOver && frames < MAX_FRAMES {
            controller.on_frame(f64::from(frames) * 1000.0 / 60.0);
            frames += 1;

            let hud = controller.hud();
            if controller.state().score != last_score {
                last_score = controller.state().score;
                log::info!("Score {} at {} speed", hud.score, hud.speed);
            }
        }

        let state = controller.state();
        println!(
            "Demo finished after {:.1}s: score {}, length {}, {:?}",
            f64::from(frames) / 60.0,
            state.score,
            state.snake.len(),
            state.phase
        );
    }
}
