//! Game-over popup geometry
//!
//! The popup pops in with an overshoot (grow past 1.1, settle back to 1.0).
//! The retry button hangs below the popup, so it moves while the popup
//! animates and hit-testing must use the current frame's geometry.

use glam::Vec2;

use crate::consts::{RETRY_BUTTON_HEIGHT, RETRY_BUTTON_WIDTH, RETRY_HIT_MARGIN};
use crate::sim::collision::Aabb;
use crate::sim::layout::Layout;

const GROW_RATE: f32 = 0.08;
const SHRINK_RATE: f32 = 0.05;
const OVERSHOOT: f32 = 1.1;
/// Popup width as a fraction of field width at scale 1
const POPUP_WIDTH_RATIO: f32 = 0.8;
/// Height / width of the popup image
const POPUP_ASPECT: f32 = 0.7;
/// Vertical distance from popup bottom to retry button
const BUTTON_SPACING: f32 = 20.0;

/// Pop-in animation state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GameOverPopup {
    pub scale: f32,
    bouncing_back: bool,
}

impl GameOverPopup {
    /// Advance one tick
    pub fn animate(&mut self) {
        if !self.bouncing_back {
            self.scale += GROW_RATE;
            if self.scale >= OVERSHOOT {
                self.bouncing_back = true;
            }
        } else {
            self.scale = (self.scale - SHRINK_RATE).max(1.0);
        }
    }

    /// Done overshooting and resting at full size
    pub fn is_settled(&self) -> bool {
        self.bouncing_back && self.scale <= 1.0
    }

    /// Popup image rectangle, centred in the field
    pub fn popup_rect(&self, layout: &Layout) -> Aabb {
        let width = layout.width * POPUP_WIDTH_RATIO * self.scale;
        let size = Vec2::new(width, width * POPUP_ASPECT);
        let center = Vec2::new(layout.width, layout.height) / 2.0;
        Aabb::from_pos_size(center - size / 2.0, size)
    }

    /// Retry button rectangle for the current animation frame
    pub fn retry_button(&self, layout: &Layout) -> Aabb {
        let popup = self.popup_rect(layout);
        let pos = Vec2::new(
            layout.width / 2.0 - RETRY_BUTTON_WIDTH / 2.0,
            popup.max.y + BUTTON_SPACING,
        );
        Aabb::from_pos_size(pos, Vec2::new(RETRY_BUTTON_WIDTH, RETRY_BUTTON_HEIGHT))
    }

    /// Field-space point lands on the retry button (with tap slack)
    pub fn hits_retry(&self, layout: &Layout, point: Vec2) -> bool {
        self.retry_button(layout).contains_with_margin(point, RETRY_HIT_MARGIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn layout() -> Layout {
        Layout::new(480.0, 800.0, &Tuning::default())
    }

    #[test]
    fn test_popup_overshoots_then_settles() {
        let mut popup = GameOverPopup::default();
        let mut peak: f32 = 0.0;
        for _ in 0..100 {
            popup.animate();
            peak = peak.max(popup.scale);
        }
        assert!(peak >= OVERSHOOT);
        assert!(popup.is_settled());
        assert_eq!(popup.scale, 1.0);
    }

    #[test]
    fn test_retry_button_below_settled_popup() {
        let popup = GameOverPopup {
            scale: 1.0,
            bouncing_back: true,
        };
        let l = layout();
        // popup 384 x 268.8 centred at (240, 400)
        let rect = popup.popup_rect(&l);
        assert!((rect.max.y - 534.4).abs() < 1e-3);

        let button = popup.retry_button(&l);
        assert!((button.min.x - 160.0).abs() < 1e-3);
        assert!((button.min.y - 554.4).abs() < 1e-3);
        assert_eq!(button.size(), Vec2::new(160.0, 45.0));
    }

    #[test]
    fn test_hits_retry_uses_margin() {
        let popup = GameOverPopup {
            scale: 1.0,
            bouncing_back: true,
        };
        let l = layout();
        assert!(popup.hits_retry(&l, Vec2::new(240.0, 575.0)));
        // 4 px left of the button, inside the slack
        assert!(popup.hits_retry(&l, Vec2::new(156.0, 575.0)));
        assert!(!popup.hits_retry(&l, Vec2::new(150.0, 575.0)));
        assert!(!popup.hits_retry(&l, Vec2::new(240.0, 100.0)));
    }
}
