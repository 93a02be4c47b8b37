//! Input translation
//!
//! Browser events arrive in client (viewport) pixels. The simulation works in
//! field pixels of the round's frozen layout, which the renderer scales to
//! fill the canvas, so pointer positions are mapped back the same way.

use glam::Vec2;

use crate::sim::Layout;

/// On-screen rectangle of the canvas (from `getBoundingClientRect`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Keyboard commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Primary action (start / flap)
    Action,
    /// Toggle sound
    ToggleMute,
}

/// Map a `KeyboardEvent.code` to a command
pub fn map_key(code: &str) -> Option<KeyCommand> {
    match code {
        "Space" | "ArrowUp" | "KeyW" => Some(KeyCommand::Action),
        "KeyM" => Some(KeyCommand::ToggleMute),
        _ => None,
    }
}

/// Client-space point to field-space point
pub fn client_to_field(client: Vec2, rect: CanvasRect, layout: &Layout) -> Vec2 {
    let local = client - Vec2::new(rect.left, rect.top);
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return local;
    }
    let scale = Vec2::new(layout.width / rect.width, layout.height / rect.height);
    local * scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_map_key() {
        assert_eq!(map_key("Space"), Some(KeyCommand::Action));
        assert_eq!(map_key("KeyM"), Some(KeyCommand::ToggleMute));
        assert_eq!(map_key("Enter"), None);
    }

    #[test]
    fn test_offset_canvas_translates() {
        let layout = Layout::new(480.0, 800.0, &Tuning::default());
        let rect = CanvasRect {
            left: 100.0,
            top: 20.0,
            width: 480.0,
            height: 800.0,
        };
        let p = client_to_field(Vec2::new(340.0, 595.0), rect, &layout);
        assert_eq!(p, Vec2::new(240.0, 575.0));
    }

    #[test]
    fn test_resized_canvas_scales_into_frozen_field() {
        // Round started at 480x800, window since grew to 600x1000
        let layout = Layout::new(480.0, 800.0, &Tuning::default());
        let rect = CanvasRect {
            left: 0.0,
            top: 0.0,
            width: 600.0,
            height: 1000.0,
        };
        let p = client_to_field(Vec2::new(300.0, 500.0), rect, &layout);
        assert!((p - Vec2::new(240.0, 400.0)).length() < 1e-3);
    }
}
