//! Game state and core simulation types
//!
//! One owned `GameState` holds everything a round needs; the host passes it
//! explicitly to `tick` and to the renderer.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use super::layout::Layout;
use crate::tuning::Tuning;
use crate::ui::GameOverPopup;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the first input
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for a retry tap
    GameOver,
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    Ground,
    Pipe,
}

/// Side effects requested by the simulation, handled by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Start -> Playing
    Started,
    /// Impulse applied
    Flapped,
    /// A pipe was passed
    Scored { score: u64 },
    /// Difficulty ramp step
    SpeedUp { speed: f32 },
    /// Playing -> GameOver
    Crashed { cause: CrashCause, score: u64 },
    /// Best score improved, persist it
    NewBest { score: u64 },
    /// GameOver -> Start
    Restarted,
}

/// The player's bird
#[derive(Debug, Clone)]
pub struct Bird {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive = falling)
    pub vel: f32,
}

impl Bird {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            size: Vec2::splat(size),
            vel: 0.0,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Symplectic Euler step: velocity first, then position
    pub fn integrate(&mut self, gravity: f32) {
        self.vel += gravity;
        self.pos.y += self.vel;
    }

    /// Replace the current velocity with the flap impulse
    pub fn flap(&mut self, lift: f32) {
        self.vel = lift;
    }

    /// Sprite tilt in radians: nose up when rising, diving when falling
    pub fn rotation(&self) -> f32 {
        (self.vel * 0.1).clamp(-std::f32::consts::FRAC_PI_4, std::f32::consts::FRAC_PI_2)
    }
}

/// A pipe pair with a gap between the top and bottom segments
#[derive(Debug, Clone)]
pub struct Pipe {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Height of the top segment (= y of the gap's top edge)
    pub top: f32,
    /// Height of the bottom segment
    pub bottom: f32,
    /// Already counted toward the score
    pub passed: bool,
}

impl Pipe {
    pub fn new(id: u32, x: f32, width: f32, top: f32, gap: f32, field_height: f32) -> Self {
        Self {
            id,
            x,
            width,
            top,
            bottom: field_height - top - gap,
            passed: false,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// y of the bottom segment's upper edge
    #[inline]
    pub fn bottom_edge(&self, field_height: f32) -> f32 {
        field_height - self.bottom
    }

    /// Fully scrolled off the left edge
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.right() <= 0.0
    }

    pub fn top_aabb(&self) -> Aabb {
        Aabb::new(Vec2::new(self.x, 0.0), Vec2::new(self.right(), self.top))
    }

    pub fn bottom_aabb(&self, field_height: f32) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, self.bottom_edge(field_height)),
            Vec2::new(self.right(), field_height),
        )
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay constants for this session
    pub tuning: Tuning,
    /// Field dimensions frozen for the current round
    pub layout: Layout,
    /// Resize received mid-round, applied on the next restart
    pub pending_layout: Option<Layout>,
    /// Current phase
    pub phase: GamePhase,
    /// The player
    pub bird: Bird,
    /// Active pipes in spawn order (left to right)
    pub pipes: Vec<Pipe>,
    /// Current run score
    pub score: u64,
    /// Best score across runs (never decreases)
    pub best_score: u64,
    /// Current pipe scroll speed
    pub pipe_speed: f32,
    /// Ticks spent in Playing this round
    pub time_ticks: u64,
    /// Game-over popup animation
    pub popup: GameOverPopup,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new game state on the title screen. Unusable tuning is
    /// replaced by the defaults.
    pub fn new(seed: u64, tuning: Tuning, layout: Layout, best_score: u64) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Rejected tuning ({}), using defaults", e);
                Tuning::default()
            }
        };
        let bird = Self::initial_bird(&tuning, &layout);
        let pipe_speed = tuning.base_pipe_speed;
        Self {
            seed,
            tuning,
            layout,
            pending_layout: None,
            phase: GamePhase::Start,
            bird,
            pipes: Vec::new(),
            score: 0,
            best_score,
            pipe_speed,
            time_ticks: 0,
            popup: GameOverPopup::default(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    fn initial_bird(tuning: &Tuning, layout: &Layout) -> Bird {
        Bird::new(Vec2::new(tuning.bird_x, tuning.bird_start_y), layout.bird_size)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Field size changed. Applied now on the title screen, deferred otherwise
    /// so pipes already in flight keep the geometry they spawned with.
    pub fn resize(&mut self, layout: Layout) {
        if self.layout == layout {
            self.pending_layout = None;
            return;
        }
        match self.phase {
            GamePhase::Start => {
                log::info!("Layout {}x{} applied", layout.width, layout.height);
                self.apply_layout(layout);
            }
            GamePhase::Playing | GamePhase::GameOver => {
                log::debug!("Layout {}x{} deferred to next round", layout.width, layout.height);
                self.pending_layout = Some(layout);
            }
        }
    }

    fn apply_layout(&mut self, layout: Layout) {
        self.layout = layout;
        self.pending_layout = None;
        self.bird.size = Vec2::splat(layout.bird_size);
    }

    /// Back to the title screen with a fresh round; best score is kept
    pub fn reset(&mut self) {
        if let Some(layout) = self.pending_layout.take() {
            self.layout = layout;
        }
        self.bird = Self::initial_bird(&self.tuning, &self.layout);
        self.pipes.clear();
        self.score = 0;
        self.pipe_speed = self.tuning.base_pipe_speed;
        self.time_ticks = 0;
        self.popup = GameOverPopup::default();
        self.phase = GamePhase::Start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        let tuning = Tuning::default();
        let layout = Layout::new(480.0, 800.0, &tuning);
        GameState::new(7, tuning, layout, 0)
    }

    #[test]
    fn test_invalid_tuning_falls_back_to_defaults() {
        let tuning = Tuning {
            speed_ramp_ticks: 0,
            gravity: 0.5,
            ..Tuning::default()
        };
        let layout = Layout::new(480.0, 800.0, &Tuning::default());
        let s = GameState::new(7, tuning, layout, 0);
        assert_eq!(s.tuning, Tuning::default());
    }

    #[test]
    fn test_new_state_is_on_title_screen() {
        let s = state();
        assert_eq!(s.phase, GamePhase::Start);
        assert!(s.pipes.is_empty());
        assert_eq!(s.bird.pos, Vec2::new(80.0, 300.0));
        assert_eq!(s.bird.vel, 0.0);
        assert_eq!(s.pipe_speed, 1.5);
    }

    #[test]
    fn test_pipe_bottom_height_from_gap() {
        // 800 - 300 - 176 = 324
        let p = Pipe::new(1, 480.0, 86.4, 300.0, 176.0, 800.0);
        assert!((p.bottom - 324.0).abs() < 1e-3);
        assert!((p.bottom_edge(800.0) - 476.0).abs() < 1e-3);
        assert_eq!(p.top_aabb().max.y, 300.0);
        assert_eq!(p.bottom_aabb(800.0).max.y, 800.0);
    }

    #[test]
    fn test_bird_rotation_is_clamped() {
        let mut bird = Bird::new(Vec2::ZERO, 10.0);
        bird.vel = -40.0;
        assert_eq!(bird.rotation(), -std::f32::consts::FRAC_PI_4);
        bird.vel = 40.0;
        assert_eq!(bird.rotation(), std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_flap_overrides_velocity() {
        let mut bird = Bird::new(Vec2::ZERO, 10.0);
        bird.vel = 7.5;
        bird.flap(-4.0);
        assert_eq!(bird.vel, -4.0);
    }

    #[test]
    fn test_resize_on_title_screen_applies_now() {
        let mut s = state();
        let bigger = Layout::new(600.0, 1000.0, &s.tuning);
        s.resize(bigger);
        assert_eq!(s.layout, bigger);
        assert!(s.pending_layout.is_none());
        assert!((s.bird.size.x - 70.0).abs() < 1e-3);
    }

    #[test]
    fn test_resize_mid_round_waits_for_restart() {
        let mut s = state();
        s.phase = GamePhase::Playing;
        let original = s.layout;
        let bigger = Layout::new(600.0, 1000.0, &s.tuning);
        s.resize(bigger);
        assert_eq!(s.layout, original);
        assert_eq!(s.pending_layout, Some(bigger));

        s.reset();
        assert_eq!(s.layout, bigger);
        assert!(s.pending_layout.is_none());
    }
}
