//! In-memory store for tests and ephemeral sessions

use std::collections::HashMap;

use super::{PersistError, ScoreStore};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    /// When set, every read and write fails with `Unavailable`
    pub failing: bool,
    /// Number of successful writes
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl ScoreStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        if self.failing {
            return Err(PersistError::Unavailable("memory store set to fail".into()));
        }
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        if self.failing {
            return Err(PersistError::Unavailable("memory store set to fail".into()));
        }
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
