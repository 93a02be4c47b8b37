//! Data-driven game balance
//!
//! Every gameplay constant lives here so a round can be re-tuned from JSON
//! without touching the simulation. Physics values are per tick.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a tuning document was rejected
#[derive(Debug)]
pub enum TuningError {
    /// Not valid JSON for `Tuning`
    Parse(serde_json::Error),
    /// Parsed, but a value is out of range
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning is not valid JSON: {}", e),
            TuningError::Invalid { field, reason } => write!(f, "tuning.{} {}", field, reason),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Bird ===
    /// Downward acceleration added to velocity every tick
    pub gravity: f32,
    /// Velocity set on flap (negative = up)
    pub lift: f32,
    /// Fixed horizontal position of the bird
    pub bird_x: f32,
    /// Vertical position on (re)start
    pub bird_start_y: f32,
    /// Bird edge length as a fraction of field height
    pub bird_size_ratio: f32,

    // === Pipes ===
    /// Vertical gap as a fraction of field height
    pub gap_ratio: f32,
    /// Horizontal distance between spawns as a fraction of field width
    pub pipe_spacing_ratio: f32,
    /// Pipe width as a fraction of field width
    pub pipe_width_ratio: f32,
    /// Shortest allowed top/bottom segment
    pub min_pipe_height: f32,

    // === Difficulty ===
    /// Pipe scroll speed at the start of a round
    pub base_pipe_speed: f32,
    /// Added to the scroll speed at every ramp boundary
    pub speed_step: f32,
    /// Ticks between speed increases
    pub speed_ramp_ticks: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.18,
            lift: -4.0,
            bird_x: 80.0,
            bird_start_y: 300.0,
            bird_size_ratio: 0.07,

            gap_ratio: 0.22,
            pipe_spacing_ratio: 0.8,
            pipe_width_ratio: 0.18,
            min_pipe_height: 50.0,

            base_pipe_speed: 1.5,
            speed_step: 0.1,
            speed_ramp_ticks: 280,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, v: f32) -> Result<(), TuningError> {
            if !v.is_finite() {
                return Err(TuningError::Invalid { field, reason: "must be finite" });
            }
            if v <= 0.0 {
                return Err(TuningError::Invalid { field, reason: "must be positive" });
            }
            Ok(())
        }

        fn non_negative(field: &'static str, v: f32) -> Result<(), TuningError> {
            if !v.is_finite() || v < 0.0 {
                return Err(TuningError::Invalid { field, reason: "must be finite and >= 0" });
            }
            Ok(())
        }

        positive("gravity", self.gravity)?;
        if !self.lift.is_finite() || self.lift >= 0.0 {
            return Err(TuningError::Invalid { field: "lift", reason: "must be negative (upward)" });
        }
        non_negative("bird_x", self.bird_x)?;
        non_negative("bird_start_y", self.bird_start_y)?;
        positive("bird_size_ratio", self.bird_size_ratio)?;
        positive("gap_ratio", self.gap_ratio)?;
        if self.gap_ratio >= 1.0 {
            return Err(TuningError::Invalid { field: "gap_ratio", reason: "must be below 1" });
        }
        positive("pipe_spacing_ratio", self.pipe_spacing_ratio)?;
        positive("pipe_width_ratio", self.pipe_width_ratio)?;
        non_negative("min_pipe_height", self.min_pipe_height)?;
        positive("base_pipe_speed", self.base_pipe_speed)?;
        non_negative("speed_step", self.speed_step)?;
        if self.speed_ramp_ticks == 0 {
            return Err(TuningError::Invalid { field: "speed_ramp_ticks", reason: "must be at least 1" });
        }
        Ok(())
    }

    /// Load tuning overrides from the page (`<script id="tuning" type="application/json">`)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("tuning"))
            .and_then(|el| el.text_content());

        match text {
            Some(json) if !json.trim().is_empty() => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides from page");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring tuning overrides: {}", e);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    /// Load tuning from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.25, "speed_ramp_ticks": 300 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.25);
        assert_eq!(tuning.speed_ramp_ticks, 300);
        assert_eq!(tuning.lift, Tuning::default().lift);
    }

    #[test]
    fn test_rejects_upward_gravity_and_downward_lift() {
        let err = Tuning::from_json(r#"{ "gravity": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "gravity", .. }));

        let err = Tuning::from_json(r#"{ "lift": 2.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "lift", .. }));
    }

    #[test]
    fn test_rejects_zero_ramp_interval() {
        let err = Tuning::from_json(r#"{ "speed_ramp_ticks": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("speed_ramp_ticks"));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Parse(_))));
    }
}
