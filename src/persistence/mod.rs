//! High score and points persistence
//!
//! Records are stored as small text values, one per key:
//! - high score: best distance with two decimals (`"7.42"`)
//! - points: points of the last finished run as an integer (`"20"`)
//!
//! Backends only move raw strings; the record format lives in the
//! [`ScoreStore`] provided methods so every backend reads what the others write.

use std::fmt;

use crate::levels::LevelId;

pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;
pub mod memory;

pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;
pub use memory::MemoryStore;

/// Persistence failures
#[derive(Debug)]
pub enum PersistError {
    Io(std::io::Error),
    /// A stored value could not be parsed
    Parse { key: String, value: String },
    /// The backing store cannot be reached
    Unavailable(String),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "storage I/O error: {}", e),
            PersistError::Parse { key, value } => {
                write!(f, "stored value for '{}' is not a number: {:?}", key, value)
            }
            PersistError::Unavailable(reason) => write!(f, "storage unavailable: {}", reason),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(e: std::io::Error) -> Self {
        PersistError::Io(e)
    }
}

/// Storage keys for one level's records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKeys {
    pub high_score: String,
    pub points: String,
}

impl RecordKeys {
    pub fn for_level(id: LevelId) -> Self {
        Self {
            high_score: id.high_score_key().to_string(),
            points: id.points_key().to_string(),
        }
    }

    /// Keys for a custom level, derived from its name
    pub fn custom(name: &str) -> Self {
        let slug: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        Self {
            high_score: format!("high_score_custom_{}", slug),
            points: format!("points_collected_custom_{}", slug),
        }
    }
}

/// A key/value backend for persisted records
pub trait ScoreStore {
    /// Raw stored value, `None` if the key was never written
    fn read(&self, key: &str) -> Result<Option<String>, PersistError>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistError>;

    /// Best distance, `None` if no run has ever finished
    fn load_high_score(&self, key: &str) -> Result<Option<f32>, PersistError> {
        parse_value(key, self.read(key)?)
    }

    fn save_high_score(&mut self, key: &str, distance: f32) -> Result<(), PersistError> {
        self.write(key, &format!("{:.2}", distance))
    }

    /// Points of the last finished run, `None` if never written
    fn load_points_total(&self, key: &str) -> Result<Option<u32>, PersistError> {
        parse_value(key, self.read(key)?)
    }

    fn save_points_total(&mut self, key: &str, points: u32) -> Result<(), PersistError> {
        self.write(key, &points.to_string())
    }
}

fn parse_value<T: std::str::FromStr>(
    key: &str,
    raw: Option<String>,
) -> Result<Option<T>, PersistError> {
    match raw {
        None => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| PersistError::Parse {
            key: key.to_string(),
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_score_written_with_two_decimals() {
        let mut store = MemoryStore::new();
        store.save_high_score("high_score", 7.4189).unwrap();
        assert_eq!(store.read("high_score").unwrap().as_deref(), Some("7.42"));
        let loaded = store.load_high_score("high_score").unwrap().unwrap();
        assert!((loaded - 7.42).abs() < 1e-6);
    }

    #[test]
    fn test_missing_records_are_none() {
        let store = MemoryStore::new();
        assert_eq!(store.load_high_score("high_score_lv2").unwrap(), None);
        assert_eq!(store.load_points_total("points_collected_lv2").unwrap(), None);
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let mut store = MemoryStore::new();
        store.write("points_collected", "lots").unwrap();
        let err = store.load_points_total("points_collected").unwrap_err();
        assert!(matches!(err, PersistError::Parse { .. }));
        assert!(err.to_string().contains("points_collected"));
    }

    #[test]
    fn test_values_tolerate_trailing_newline() {
        let mut store = MemoryStore::new();
        store.write("points_collected", "30\n").unwrap();
        assert_eq!(store.load_points_total("points_collected").unwrap(), Some(30));
    }

    #[test]
    fn test_record_keys() {
        let keys = RecordKeys::for_level(LevelId::Hard);
        assert_eq!(keys.high_score, "high_score_lv3");
        assert_eq!(keys.points, "points_collected_lv3");

        let keys = RecordKeys::custom("My Level!");
        assert_eq!(keys.high_score, "high_score_custom_my_level_");
    }
}
