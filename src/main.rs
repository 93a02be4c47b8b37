//! Flappy-Jak entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{AddEventListenerOptions, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy_jak::audio::{AudioManager, SoundEffect};
    use flappy_jak::persistence::{LocalStorage, Storage};
    use flappy_jak::platform::{CanvasRect, KeyCommand, client_to_field, map_key};
    use flappy_jak::renderer::{CanvasRenderer, build};
    use flappy_jak::sim::{GameEvent, GameState, Layout, TickInput, tick};
    use flappy_jak::{BestScore, FrameClock, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        audio: AudioManager,
        settings: Settings,
        best: BestScore,
        storage: Option<LocalStorage>,
        clock: FrameClock,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        /// Run simulation ticks for this frame
        fn update(&mut self, dt: f32) {
            let steps = self.clock.advance(dt);
            for _ in 0..steps {
                let input = std::mem::take(&mut self.input);
                let events = tick(&mut self.state, &input);
                self.handle_events(&events);
            }
        }

        /// Perform the side effects the simulation asked for
        fn handle_events(&mut self, events: &[GameEvent]) {
            for event in events {
                if let Some(effect) = SoundEffect::for_event(event) {
                    self.audio.play(effect);
                }
                if let GameEvent::NewBest { score } = *event {
                    if self.best.record(score) {
                        if let Some(storage) = self.storage.as_mut() {
                            if let Err(e) = self.best.save(storage) {
                                log::warn!("Could not save best score: {}", e);
                            }
                        }
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            let commands = build(&self.state, &self.settings);
            self.renderer.render(&commands, &self.state.layout);
        }

        /// Queue a pointer/touch action at client coordinates
        fn pointer_action(&mut self, client_x: f32, client_y: f32) {
            let rect = self.renderer.canvas().get_bounding_client_rect();
            let rect = CanvasRect {
                left: rect.left() as f32,
                top: rect.top() as f32,
                width: rect.width() as f32,
                height: rect.height() as f32,
            };
            let pos = client_to_field(Vec2::new(client_x, client_y), rect, &self.state.layout);
            self.input = TickInput::pointer(pos);
        }

        fn key_action(&mut self) {
            // A pending pointer action already carries the action
            if !self.input.action {
                self.input = TickInput::key();
            }
        }

        fn toggle_mute(&mut self) {
            let muted = self.settings.toggle_mute();
            self.audio.apply_settings(&self.settings);
            log::info!("Sound {}", if muted { "muted" } else { "on" });
            if let Some(storage) = self.storage.as_mut() {
                if let Err(e) = self.settings.save(storage) {
                    log::warn!("Could not save settings: {}", e);
                }
            }
        }

        /// Window changed size: refit the canvas, update the field
        fn resize(&mut self) {
            let (w, h) = window_size();
            let layout = Layout::fit_window(w, h, &self.state.tuning);
            self.renderer.resize(layout.width as u32, layout.height as u32);
            self.state.resize(layout);
        }
    }

    fn window_size() -> (f32, f32) {
        let Some(window) = web_sys::window() else {
            return (480.0, 800.0);
        };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(480.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        (w as f32, h as f32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Flappy-Jak starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas element");
            return;
        };
        let Some(mut renderer) = CanvasRenderer::new(canvas) else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        let storage = match LocalStorage::open() {
            Ok(storage) => Some(storage),
            Err(e) => {
                log::warn!("LocalStorage unavailable ({}), scores won't persist", e);
                None
            }
        };
        let (best, settings) = match storage.as_ref() {
            Some(s) => (
                BestScore::load_or_default(s as &dyn Storage),
                Settings::load_or_default(s as &dyn Storage),
            ),
            None => (BestScore::default(), Settings::default()),
        };

        let tuning = Tuning::load();
        let (w, h) = window_size();
        let layout = Layout::fit_window(w, h, &tuning);
        renderer.resize(layout.width as u32, layout.height as u32);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, tuning, layout, best.get()),
            renderer,
            audio: AudioManager::new(&settings),
            settings,
            best,
            storage,
            clock: FrameClock::new(),
            last_time: 0.0,
            input: TickInput::default(),
        }));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Flappy-Jak running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };
        let canvas = game.borrow().renderer.canvas().clone();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match map_key(&event.code()) {
                    Some(KeyCommand::Action) => {
                        event.prevent_default();
                        game.borrow_mut().key_action();
                    }
                    Some(KeyCommand::ToggleMute) => game.borrow_mut().toggle_mute(),
                    None => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .pointer_action(event.client_x() as f32, event.client_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch (non-passive so we can stop the synthetic mousedown and scrolling)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.changed_touches().get(0) {
                    game.borrow_mut()
                        .pointer_action(touch.client_x() as f32, touch.client_y() as f32);
                }
            });
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }

        // Resize
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                game.borrow_mut().resize();
            });
            let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Quiet while in the background
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    let mut quiet = g.settings.clone();
                    quiet.muted = true;
                    g.audio.apply_settings(&quiet);
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut()>::new(move || {
                let mut g = game.borrow_mut();
                let settings = g.settings.clone();
                g.audio.apply_settings(&settings);
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                flappy_jak::consts::SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy-Jak (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable version");

    let options = native::Options::parse();
    let summary = native::run_headless(&options);
    println!(
        "seed {}: score {} after {} ticks (best {})",
        options.seed, summary.score, summary.ticks, summary.best
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use flappy_jak::persistence::MemoryStorage;
    use flappy_jak::sim::{GameEvent, GamePhase, GameState, Layout, autopilot, tick};
    use flappy_jak::{BestScore, Tuning};

    /// Headless Flappy-Jak: the autopilot plays one round
    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    pub struct Options {
        /// JSON file overriding gameplay tuning
        pub tuning: Option<PathBuf>,

        /// Stop after this many ticks even if the bird is still flying
        #[arg(long, default_value_t = 10_000)]
        pub ticks: u64,

        /// Seed for pipe placement
        #[arg(long, default_value_t = 1)]
        pub seed: u64,
    }

    pub struct Summary {
        pub score: u64,
        pub best: u64,
        pub ticks: u64,
    }

    /// Let the autopilot play one round
    pub fn run_headless(options: &Options) -> Summary {
        let tuning = options
            .tuning
            .as_deref()
            .map(Tuning::load_file)
            .unwrap_or_default();
        let mut storage = MemoryStorage::new();
        let mut best = BestScore::load_or_default(&storage);
        let layout = Layout::new(480.0, 800.0, &tuning);
        let mut state = GameState::new(options.seed, tuning, layout, best.get());

        let mut ticks = 0;
        while ticks < options.ticks {
            let input = autopilot(&state);
            for event in tick(&mut state, &input) {
                log::debug!("tick {}: {:?}", ticks, event);
                if let GameEvent::NewBest { score } = event {
                    if best.record(score) {
                        if let Err(e) = best.save(&mut storage) {
                            log::warn!("Could not save best score: {}", e);
                        }
                    }
                }
            }
            ticks += 1;
            if state.phase == GamePhase::GameOver {
                break;
            }
        }

        Summary {
            score: state.score,
            best: best.get(),
            ticks,
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use clap::Parser;
    use clap::error::ErrorKind;

    use super::native::{Options, run_headless};

    #[test]
    fn test_defaults_without_arguments() {
        let options = Options::try_parse_from(["flappy-jak"]).unwrap();
        assert!(options.tuning.is_none());
        assert_eq!(options.ticks, 10_000);
        assert_eq!(options.seed, 1);
    }

    #[test]
    fn test_path_and_flags() {
        let options =
            Options::try_parse_from(["flappy-jak", "fast.json", "--ticks", "50", "--seed", "9"])
                .unwrap();
        assert_eq!(options.tuning.as_deref(), Some(std::path::Path::new("fast.json")));
        assert_eq!(options.ticks, 50);
        assert_eq!(options.seed, 9);
    }

    #[test]
    fn test_misspelled_flag_is_rejected() {
        let err = Options::try_parse_from(["flappy-jak", "--tick", "50"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_second_path_is_rejected() {
        assert!(Options::try_parse_from(["flappy-jak", "a.json", "b.json"]).is_err());
    }

    #[test]
    fn test_help_does_not_become_a_path() {
        let err = Options::try_parse_from(["flappy-jak", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_tick_limit_stops_the_run() {
        let options = Options::try_parse_from(["flappy-jak", "--ticks", "5"]).unwrap();
        let summary = run_headless(&options);
        assert_eq!(summary.ticks, 5);
    }
}
