//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key codes, pointer/touch coordinates)
//! - Mapping client coordinates into play-field space

pub mod input;

pub use input::{CanvasRect, KeyCommand, client_to_field, map_key};
