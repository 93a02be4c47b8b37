//! Flappy-Jak - a single-screen flap-through-the-pipes arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `renderer`: Draw-command scene and the canvas 2D executor
//! - `platform`: Browser/native input translation
//! - `persistence`: Key/value storage (LocalStorage on web, memory elsewhere)
//! - `tuning`: Data-driven game balance
//! - `audio`: Procedural Web Audio sound effects

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use highscores::BestScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta the driver will try to catch up on (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Play-field aspect ratio (width / height)
    pub const FIELD_ASPECT: f32 = 0.6;

    /// Retry button size (field pixels)
    pub const RETRY_BUTTON_WIDTH: f32 = 160.0;
    pub const RETRY_BUTTON_HEIGHT: f32 = 45.0;
    /// Slack around the retry button for fat-finger taps
    pub const RETRY_HIT_MARGIN: f32 = 6.0;

    /// LocalStorage keys
    pub const BEST_SCORE_KEY: &str = "flappyHighScore";
    pub const SETTINGS_KEY: &str = "flappy_jak_settings";
}

/// Fixed-timestep accumulator shared by the browser loop and the headless runner
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame delta (seconds), returns how many sim ticks to run
    pub fn advance(&mut self, dt: f32) -> u32 {
        let dt = if dt.is_finite() { dt.clamp(0.0, consts::MAX_FRAME_DT) } else { 0.0 };
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= consts::SIM_DT && steps < consts::MAX_SUBSTEPS {
            self.accumulator -= consts::SIM_DT;
            steps += 1;
        }
        // Drop backlog we refused to simulate
        if steps == consts::MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(consts::SIM_DT);
        }
        steps
    }
}
