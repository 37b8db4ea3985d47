//! Mothershucker entry point
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
    use web_sys::{HtmlCanvasElement, HtmlImageElement, MouseEvent};

    use mothershucker::Tuning;
    use mothershucker::consts::*;
    use mothershucker::platform::FrameLoop;
    use mothershucker::renderer::{AssetStatus, CanvasSurface, render};
    use mothershucker::sim::{GameState, InputEvent, apply_input, tick};

    const TITLE_IMAGE: &str = "images/mothershucker-title.png";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        surface: CanvasSurface,
        title: AssetStatus,
    }

    impl Game {
        /// One display frame: advance, report, draw
        fn frame(&mut self) {
            tick(&mut self.state);

            for event in self.state.drain_events() {
                log::debug!("{:?}", event);
            }

            render(&mut self.surface, &self.state, self.title);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Mothershucker starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas element"))?
            .dyn_into()?;

        let surface = CanvasSurface::new(canvas.clone())?;
        let tuning = Tuning::load();

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::with_tuning(seed, tuning),
            surface,
            title: AssetStatus::Loading,
        }));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        load_title_image(game.clone());

        let frame_loop = FrameLoop::new();
        setup_pagehide(frame_loop.clone());

        frame_loop.start(move |_time| game.borrow_mut().frame());

        log::info!("Mothershucker running!");
        Ok(())
    }

    /// Map a mouse event into the 800×600 drawing space
    fn pointer_position(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        let sx = if rect.width() > 0.0 { CANVAS_WIDTH as f64 / rect.width() } else { 1.0 };
        let sy = if rect.height() > 0.0 { CANVAS_HEIGHT as f64 / rect.height() } else { 1.0 };
        Vec2::new(
            ((event.client_x() as f64 - rect.left()) * sx) as f32,
            ((event.client_y() as f64 - rect.top()) * sy) as f32,
        )
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move: aim, steer, hover
        {
            let game = game.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = pointer_position(&target, &event);
                apply_input(&mut game.borrow_mut().state, InputEvent::PointerMoved(pos));
            });
            let _ = canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click: buttons, throw, return to menu
        {
            let game = game.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                // Clicks carry their own position; apply it before the click
                let pos = pointer_position(&target, &event);
                apply_input(&mut g.state, InputEvent::PointerMoved(pos));
                apply_input(&mut g.state, InputEvent::Clicked);
            });
            let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn load_title_image(game: Rc<RefCell<Game>>) {
        let image = match HtmlImageElement::new() {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Cannot create title image ({:?}); using drawn menu", e);
                game.borrow_mut().title = AssetStatus::Failed;
                return;
            }
        };

        {
            let game = game.clone();
            let loaded = image.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.title = AssetStatus::Ready {
                    width: loaded.natural_width(),
                    height: loaded.natural_height(),
                };
                g.surface.set_title_image(loaded.clone());
                log::info!("Title image loaded");
            });
            image.set_onload(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                log::warn!("Title image failed to load; using drawn menu");
                game.borrow_mut().title = AssetStatus::Failed;
            });
            image.set_onerror(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }

        image.set_src(TITLE_IMAGE);
    }

    /// Stop the loop when the page is being unloaded
    fn setup_pagehide(frame_loop: FrameLoop) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            frame_loop.stop();
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Mothershucker (native) starting...");
    log::info!("The playable build targets wasm32 - run with `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match mothershucker::Tuning::load_file(std::path::Path::new(&path)) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => mothershucker::Tuning::default(),
    };

    println!("\nRunning headless demo game...");
    headless_demo(tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one scripted Extreme game without a display
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo(tuning: mothershucker::Tuning) {
    use glam::Vec2;
    use mothershucker::platform::FrameLoop;
    use mothershucker::renderer::{AssetStatus, CommandBuffer, render};
    use mothershucker::sim::{Difficulty, GamePhase, GameState, InputEvent, apply_input, tick};
    use mothershucker::ui;

    let mut state = GameState::with_tuning(2024, tuning);

    let click = |state: &mut GameState, pos: Vec2| {
        apply_input(state, InputEvent::PointerMoved(pos));
        apply_input(state, InputEvent::Clicked);
    };

    click(&mut state, Vec2::new(110.0, 460.0));
    let extreme = ui::difficulty_buttons()
        .into_iter()
        .find(|(button, _)| *button == ui::Button::Level(Difficulty::Extreme))
        .map(|(_, rect)| rect.center());
    if let Some(pos) = extreme {
        click(&mut state, pos);
    }

    // A spread of aims from flat to lofted
    let aims = [
        Vec2::new(340.0, 330.0),
        Vec2::new(300.0, 300.0),
        Vec2::new(360.0, 350.0),
        Vec2::new(280.0, 260.0),
        Vec2::new(330.0, 320.0),
        Vec2::new(390.0, 360.0),
        Vec2::new(310.0, 310.0),
    ];
    let mut next_aim = aims.iter().cycle();

    let mut surface = CommandBuffer::default();
    let frame_loop = FrameLoop::new();
    frame_loop.run_headless(20_000, |handle| {
        if state.phase == GamePhase::Aiming {
            if let Some(&aim) = next_aim.next() {
                click(&mut state, aim);
            }
        }

        tick(&mut state);
        for event in state.drain_events() {
            log::debug!("{:?}", event);
        }

        surface.commands.clear();
        render(&mut surface, &state, AssetStatus::Failed);

        if state.phase == GamePhase::GameOver {
            handle.stop();
        }
    });

    println!(
        "Final score: {} / {} in {} frames ({} draw commands in the last frame)",
        state.score,
        state.perfect_score(),
        frame_loop.frames(),
        surface.commands.len()
    );
    if state.is_perfect() {
        println!("✓ Perfect game!");
    }
}
