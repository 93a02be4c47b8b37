//! Best score
//!
//! A single value persisted across sessions. Stored as a plain decimal
//! string so pages that saved it before keep their record.

use crate::consts::BEST_SCORE_KEY;
use crate::persistence::{Storage, StorageError};

/// Highest score ever reached (never decreases)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    value: u64,
}

impl BestScore {
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    pub fn get(&self) -> u64 {
        self.value
    }

    /// Offer a finished run's score. Returns true if it is a new record.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.value {
            self.value = score;
            true
        } else {
            false
        }
    }

    /// Read the stored record (absent = 0)
    pub fn load(storage: &dyn Storage) -> Result<Self, StorageError> {
        let Some(raw) = storage.get(BEST_SCORE_KEY)? else {
            return Ok(Self::default());
        };
        let raw = raw.trim();
        if let Ok(value) = raw.parse::<u64>() {
            return Ok(Self::new(value));
        }
        // Older pages could leave a float behind
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Ok(Self::new(v.floor() as u64)),
            _ => Err(StorageError::Corrupt {
                key: BEST_SCORE_KEY.to_string(),
                reason: format!("not a score: {:?}", raw),
            }),
        }
    }

    /// Load, falling back to 0 on any storage failure
    pub fn load_or_default(storage: &dyn Storage) -> Self {
        match Self::load(storage) {
            Ok(best) => {
                log::info!("Loaded best score {}", best.value);
                best
            }
            Err(e) => {
                log::warn!("Best score unavailable ({}), starting at 0", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        storage.set(BEST_SCORE_KEY, &self.value.to_string())?;
        log::info!("Best score saved ({})", self.value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_record_only_raises() {
        let mut best = BestScore::new(10);
        assert!(!best.record(3));
        assert!(!best.record(10));
        assert_eq!(best.get(), 10);
        assert!(best.record(11));
        assert_eq!(best.get(), 11);
    }

    #[test]
    fn test_missing_key_is_zero() {
        let storage = MemoryStorage::new();
        assert_eq!(BestScore::load(&storage).unwrap().get(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        BestScore::new(42).save(&mut storage).unwrap();
        assert_eq!(storage.get(BEST_SCORE_KEY).unwrap().as_deref(), Some("42"));
        assert_eq!(BestScore::load(&storage).unwrap().get(), 42);
    }

    #[test]
    fn test_float_value_is_floored() {
        let mut storage = MemoryStorage::new();
        storage.set(BEST_SCORE_KEY, "17.0").unwrap();
        assert_eq!(BestScore::load(&storage).unwrap().get(), 17);
    }

    #[test]
    fn test_garbage_falls_back_to_zero() {
        let mut storage = MemoryStorage::new();
        storage.set(BEST_SCORE_KEY, "lots").unwrap();
        assert!(matches!(
            BestScore::load(&storage),
            Err(StorageError::Corrupt { .. })
        ));
        assert_eq!(BestScore::load_or_default(&storage).get(), 0);
    }
}
