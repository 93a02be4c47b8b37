//! Play-field dimensions
//!
//! Bird size, gap size, pipe width and spawn spacing are all proportions of
//! the field, so they are recomputed together whenever the field changes.

use crate::consts::FIELD_ASPECT;
use crate::tuning::Tuning;

/// Field size plus the sizes derived from it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    /// Bird edge length (the sprite is square)
    pub bird_size: f32,
    /// Vertical clearance between top and bottom pipe
    pub gap: f32,
    /// Horizontal distance between consecutive spawns
    pub pipe_spacing: f32,
    pub pipe_width: f32,
    /// Shortest top/bottom segment, shrunk on tiny fields so the gap always fits
    pub min_pipe_height: f32,
}

impl Layout {
    pub fn new(width: f32, height: f32, tuning: &Tuning) -> Self {
        let width = width.max(1.0);
        let height = height.max(1.0);
        let gap = height * tuning.gap_ratio;
        let min_pipe_height = tuning.min_pipe_height.min(((height - gap) / 2.0).max(0.0));

        Self {
            width,
            height,
            bird_size: height * tuning.bird_size_ratio,
            gap,
            pipe_spacing: width * tuning.pipe_spacing_ratio,
            pipe_width: width * tuning.pipe_width_ratio,
            min_pipe_height,
        }
    }

    /// Layout for a window, letterboxed to the fixed aspect ratio
    pub fn fit_window(window_w: f32, window_h: f32, tuning: &Tuning) -> Self {
        let (w, h) = fit_to_aspect(window_w, window_h);
        Self::new(w, h, tuning)
    }

    /// Range the top segment height is drawn from: `[min, max]`
    pub fn gap_top_range(&self) -> (f32, f32) {
        let min = self.min_pipe_height;
        let max = (self.height - self.gap - self.min_pipe_height).max(min);
        (min, max)
    }
}

/// Largest field with `FIELD_ASPECT` that fits in the window
pub fn fit_to_aspect(window_w: f32, window_h: f32) -> (f32, f32) {
    let window_w = window_w.max(1.0);
    let window_h = window_h.max(1.0);
    if window_w / window_h > FIELD_ASPECT {
        (window_h * FIELD_ASPECT, window_h)
    } else {
        (window_w, window_w / FIELD_ASPECT)
    }
}
