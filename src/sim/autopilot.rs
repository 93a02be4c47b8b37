//! Demo/headless AI
//!
//! Flaps whenever the bird has dropped below the centre of the next gap.
//! Used by the native runner and the attract-mode style tests.

use super::state::{GamePhase, GameState};
use super::tick::TickInput;

/// y the bird's centre should hover around
pub fn target_y(state: &GameState) -> f32 {
    let bird_left = state.bird.pos.x;
    state
        .pipes
        .iter()
        .find(|p| p.right() >= bird_left)
        .map(|p| p.top + state.layout.gap / 2.0)
        .unwrap_or(state.layout.height / 2.0)
}

/// Input the autopilot would give this tick
pub fn autopilot(state: &GameState) -> TickInput {
    match state.phase {
        GamePhase::Start => TickInput::key(),
        GamePhase::Playing => {
            let center = state.bird.pos.y + state.bird.size.y / 2.0;
            let falling = state.bird.vel >= 0.0;
            if falling && center > target_y(state) {
                TickInput::key()
            } else {
                TickInput::default()
            }
        }
        GamePhase::GameOver => TickInput::default(),
    }
}
