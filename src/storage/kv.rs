//! Key-value storage abstraction.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::LapseError;

/// Durable string key-value storage.
///
/// Each call is atomic: a `set` either fully replaces the value or leaves the
/// previous one in place.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, LapseError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), LapseError>;

    /// Remove `key`. Returns whether it existed.
    fn remove(&self, key: &str) -> Result<bool, LapseError>;
}

/// Non-durable store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, LapseError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LapseError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, LapseError> {
        Ok(self.values.borrow_mut().remove(key).is_some())
    }
}
