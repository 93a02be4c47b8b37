//! Simulation tick
//!
//! Core game loop step. One call = one frame at `SIM_DT`; all physics
//! constants are expressed per tick.

use glam::Vec2;
use rand::Rng;

use super::collision::{hits_ground, hits_pipe};
use super::state::{CrashCause, GameEvent, GamePhase, GameState, Pipe};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Primary action (space, click, tap)
    pub action: bool,
    /// Field-space position of the action when it came from a pointer/touch
    pub pointer: Option<Vec2>,
}

impl TickInput {
    /// Keyboard action, carries no position
    pub fn key() -> Self {
        Self {
            action: true,
            pointer: None,
        }
    }

    /// Pointer or touch action at a field-space position
    pub fn pointer(pos: Vec2) -> Self {
        Self {
            action: true,
            pointer: Some(pos),
        }
    }
}

/// Advance the game state by one tick, returning the side effects to perform
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.action {
        route_action(state, input.pointer, &mut events);
    }

    match state.phase {
        GamePhase::Start => {}
        GamePhase::Playing => step_playing(state, &mut events),
        // World is frozen, only the popup moves
        GamePhase::GameOver => state.popup.animate(),
    }

    events
}

/// One input, interpreted by phase
fn route_action(state: &mut GameState, pointer: Option<Vec2>, events: &mut Vec<GameEvent>) {
    match state.phase {
        GamePhase::Start => {
            state.phase = GamePhase::Playing;
            log::info!("Round started (seed {})", state.seed);
            events.push(GameEvent::Started);
        }
        GamePhase::Playing => {
            flap(state);
            events.push(GameEvent::Flapped);
        }
        GamePhase::GameOver => {
            // Keys cannot press the retry button
            if let Some(pos) = pointer {
                if state.popup.hits_retry(&state.layout, pos) {
                    state.reset();
                    log::info!("Round reset, best score {}", state.best_score);
                    events.push(GameEvent::Restarted);
                }
            }
        }
    }
}

/// Apply the flap impulse (overrides current velocity)
pub fn flap(state: &mut GameState) {
    let lift = state.tuning.lift;
    state.bird.flap(lift);
}

fn step_playing(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let field_h = state.layout.height;

    // Bird physics
    let gravity = state.tuning.gravity;
    state.bird.integrate(gravity);
    if hits_ground(&state.bird, field_h) {
        crash(state, CrashCause::Ground, events);
        return;
    }
    if state.bird.pos.y < 0.0 {
        state.bird.pos.y = 0.0;
    }

    // Spawn when the newest pipe has moved a full spacing in from the right edge
    let spawn_line = state.layout.width - state.layout.pipe_spacing;
    if state.pipes.last().is_none_or(|p| p.x < spawn_line) {
        spawn_pipe(state);
    }

    let speed = state.pipe_speed;
    for pipe in &mut state.pipes {
        pipe.x -= speed;
    }

    let hit = state.pipes.iter().any(|p| hits_pipe(&state.bird, p, field_h));

    // Score every pipe whose right edge cleared the bird's left edge
    let bird_left = state.bird.pos.x;
    for pipe in &mut state.pipes {
        if !pipe.passed && pipe.right() < bird_left {
            pipe.passed = true;
            state.score += 1;
            events.push(GameEvent::Scored { score: state.score });
        }
    }

    state.pipes.retain(|p| !p.is_offscreen());

    if hit {
        crash(state, CrashCause::Pipe, events);
        return;
    }

    // Difficulty ramp
    state.time_ticks += 1;
    if state.time_ticks.checked_rem(state.tuning.speed_ramp_ticks) == Some(0) {
        state.pipe_speed += state.tuning.speed_step;
        log::debug!("Speed up to {:.2} at tick {}", state.pipe_speed, state.time_ticks);
        events.push(GameEvent::SpeedUp {
            speed: state.pipe_speed,
        });
    }
}

/// Spawn a pipe at the right edge with a random gap position
pub fn spawn_pipe(state: &mut GameState) {
    let layout = state.layout;
    let (min_top, max_top) = layout.gap_top_range();
    let top = if max_top > min_top {
        state.rng_mut().random_range(min_top..max_top)
    } else {
        min_top
    };

    let id = state.next_entity_id();
    log::debug!("Spawn pipe {} gap top {:.1}", id, top);
    state.pipes.push(Pipe::new(
        id,
        layout.width,
        layout.pipe_width,
        top,
        layout.gap,
        layout.height,
    ));
}

fn crash(state: &mut GameState, cause: CrashCause, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::GameOver;
    state.popup = Default::default();
    log::info!("Crashed into {:?} with score {}", cause, state.score);
    events.push(GameEvent::Crashed {
        cause,
        score: state.score,
    });

    if state.score > state.best_score {
        state.best_score = state.score;
        log::info!("New best score: {}", state.best_score);
        events.push(GameEvent::NewBest {
            score: state.best_score,
        });
    }
}
