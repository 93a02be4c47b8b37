//! Key/value persistence
//!
//! Features:
//! - `Storage` trait over string keys and values
//! - Browser LocalStorage backend (wasm32)
//! - In-memory backend for native runs and tests
//!
//! Storage is best-effort: callers log failures and fall back to defaults.

pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::fmt;

pub use memory::MemoryStorage;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

/// Storage failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No backing store (private browsing, storage disabled)
    Unavailable,
    /// Backend refused the operation (quota, security error)
    Backend(String),
    /// Stored value could not be decoded
    Corrupt { key: String, reason: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage unavailable"),
            StorageError::Backend(msg) => write!(f, "storage error: {}", msg),
            StorageError::Corrupt { key, reason } => {
                write!(f, "corrupt value under '{}': {}", key, reason)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// String key/value store
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}
