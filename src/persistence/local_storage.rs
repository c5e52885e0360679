//! Browser LocalStorage backend (wasm32 only)

use super::{PersistError, ScoreStore};

/// Prefix keeping our keys apart from anything else on the origin
const KEY_PREFIX: &str = "ball_runner_";

#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, PersistError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistError::Unavailable("LocalStorage not accessible".into()))
    }
}

impl ScoreStore for LocalStorageStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        Self::storage()?
            .get_item(&format!("{}{}", KEY_PREFIX, key))
            .map_err(|e| PersistError::Unavailable(format!("{:?}", e)))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        Self::storage()?
            .set_item(&format!("{}{}", KEY_PREFIX, key), value)
            .map_err(|e| PersistError::Unavailable(format!("{:?}", e)))
    }
}
