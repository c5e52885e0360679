//! Game settings and preferences
//!
//! Persisted separately from score records: `settings.json` in the data
//! directory on native, LocalStorage in the browser.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SUBSTEPS, TICK_HZ};
use crate::levels::LevelId;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Level played when none is given on the command line
    pub level: LevelId,
    /// Demo mode: jump over hazards automatically
    pub autopilot: bool,

    // === Pacing ===
    /// Simulation rate when paced in real time
    pub tick_hz: f32,
    /// Cap on ticks per frame
    pub max_substeps: u32,
    /// Pace ticks with the wall clock instead of running flat out
    pub realtime: bool,
    /// Give up on a run after this many ticks
    pub max_ticks: u64,

    /// Overrides the platform data directory
    pub data_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: LevelId::Medium,
            autopilot: false,
            tick_hz: TICK_HZ,
            max_substeps: MAX_SUBSTEPS,
            realtime: false,
            max_ticks: 10_000,
            data_dir: None,
        }
    }
}

impl Settings {
    const FILE_NAME: &'static str = "settings.json";

    /// LocalStorage key (the store adds its own prefix)
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "settings";

    /// Directory for records and settings: the override, else the platform default
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(crate::platform::data_dir)
    }

    /// Parse settings JSON, falling back to defaults on any error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring corrupt settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load `settings.json` from `dir`
    pub fn load_from(dir: &Path) -> Self {
        let path = dir.join(Self::FILE_NAME);
        match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Write `settings.json` into `dir`
    pub fn save_to(&self, dir: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(dir)?;
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(dir.join(Self::FILE_NAME), json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        use crate::persistence::{LocalStorageStore, ScoreStore};

        match LocalStorageStore::new().read(Self::STORAGE_KEY) {
            Ok(Some(json)) => {
                log::info!("Loaded settings from LocalStorage");
                Self::from_json(&json)
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        use crate::persistence::{LocalStorageStore, ScoreStore};

        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to encode settings: {}", e);
                return;
            }
        };
        match LocalStorageStore::new().write(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }

    /// Load from the platform data directory
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match crate::platform::data_dir() {
            Some(dir) => Self::load_from(&dir),
            None => Self::default(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let Some(dir) = self.resolved_data_dir() else {
            log::warn!("No data directory, settings not saved");
            return;
        };
        if let Err(e) = self.save_to(&dir) {
            log::warn!("Failed to save settings: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "level": "Hard", "autopilot": true }"#);
        assert_eq!(settings.level, LevelId::Hard);
        assert!(settings.autopilot);
        assert_eq!(settings.tick_hz, TICK_HZ);
        assert_eq!(settings.data_dir, None);
    }

    #[test]
    fn test_corrupt_json_falls_back() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_save_then_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            level: LevelId::Easy,
            realtime: true,
            max_ticks: 900,
            ..Default::default()
        };
        settings.save_to(dir.path()).unwrap();
        assert_eq!(Settings::load_from(dir.path()), settings);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load_from(dir.path()), Settings::default());
    }
}
