//! In-memory storage backend

use std::collections::HashMap;

use super::{Storage, StorageError};

/// Process-lifetime storage, used natively and in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.set("k", "w").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("w"));
    }
}
