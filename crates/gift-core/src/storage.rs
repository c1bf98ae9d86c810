use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, RwLock,
    },
};

use crate::CoreError;

/// Flat key-value persistence: one text value per slot name.
///
/// Implementations must make `write` atomic from the caller's perspective; a
/// reader never observes a partially written value.
pub trait KeyValueStore: Send + Sync {
    /// Returns `Ok(None)` when the key has never been written.
    fn read(&self, key: &str) -> Result<Option<String>, CoreError>;
    /// Replaces any previous value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), CoreError>;
    /// Removes `key`; succeeds when the key does not exist.
    fn remove(&self, key: &str) -> Result<(), CoreError>;
    fn keys(&self) -> Result<Vec<String>, CoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn read(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CoreError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, CoreError> {
        (**self).keys()
    }
}

/// In-memory backend used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: RwLock<BTreeMap<String, String>>,
    simulate_write_error: AtomicBool,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `write` fail until switched off again.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    fn poisoned() -> CoreError {
        CoreError::Storage("memory store lock poisoned".into())
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, CoreError> {
        let values = self.values.read().map_err(|_| Self::poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CoreError> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(CoreError::Storage("Simulated write error".into()));
        }
        let mut values = self.values.write().map_err(|_| Self::poisoned())?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let mut values = self.values.write().map_err(|_| Self::poisoned())?;
        values.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CoreError> {
        let values = self.values.read().map_err(|_| Self::poisoned())?;
        Ok(values.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let store = MemoryKeyValueStore::new();
        assert!(store.read("gifts").unwrap().is_none());
    }

    #[test]
    fn write_overwrites_previous_value() {
        let store = MemoryKeyValueStore::new();
        store.write("gifts", "[]").unwrap();
        store.write("gifts", "[1]").unwrap();
        assert_eq!(store.read("gifts").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.keys().unwrap(), vec!["gifts".to_string()]);
    }

    #[test]
    fn simulated_failure_keeps_old_value() {
        let store = MemoryKeyValueStore::new();
        store.write("gifts", "[]").unwrap();
        store.set_simulate_write_error(true);
        assert!(store.write("gifts", "[1]").is_err());
        assert_eq!(store.read("gifts").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let store = MemoryKeyValueStore::new();
        store.remove("nothing").unwrap();
    }
}
