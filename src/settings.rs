//! Player preferences
//!
//! Persisted as JSON separately from the best score.

use serde::{Deserialize, Serialize};

use crate::consts::SETTINGS_KEY;
use crate::persistence::{Storage, StorageError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// All sound off
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === HUD ===
    /// Show the best score under the current score while playing
    pub show_best: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,
            show_best: true,
        }
    }
}

impl Settings {
    /// Volume actually applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Flip mute, returns the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn load(storage: &dyn Storage) -> Result<Self, StorageError> {
        match storage.get(SETTINGS_KEY)? {
            Some(json) => serde_json::from_str(&json).map_err(|e| StorageError::Corrupt {
                key: SETTINGS_KEY.to_string(),
                reason: e.to_string(),
            }),
            None => Ok(Self::default()),
        }
    }

    /// Load, falling back to defaults on any storage failure
    pub fn load_or_default(storage: &dyn Storage) -> Self {
        match Self::load(storage) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        let json = serde_json::to_string(self).map_err(|e| StorageError::Backend(e.to_string()))?;
        storage.set(SETTINGS_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
