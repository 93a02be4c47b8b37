//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (constants are per tick)
//! - Seeded RNG only
//! - Stable iteration order (pipes kept in spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod layout;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use collision::{Aabb, hits_ground, hits_pipe};
pub use layout::{Layout, fit_to_aspect};
pub use state::{Bird, CrashCause, GameEvent, GamePhase, GameState, Pipe};
pub use tick::{TickInput, flap, spawn_pipe, tick};
