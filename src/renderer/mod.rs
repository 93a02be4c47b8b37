//! Rendering module
//!
//! `scene` turns game state into backend-neutral draw commands; `canvas`
//! executes them on the browser's 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{Color, DrawCommand, Sprite, TextAlign, build};
