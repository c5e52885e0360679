//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logger setup
//! - Where records and settings are stored

use std::path::PathBuf;

/// Install the global logger. Native reads `RUST_LOG` (default `info`).
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        eprintln!("Logger already initialized: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already initialized: {}", e).into());
    }
}

/// Per-user data directory, e.g. `~/.local/share/ball-runner`
#[cfg(not(target_arch = "wasm32"))]
pub fn data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "ball-runner").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Browsers have no data directory; records go to LocalStorage
#[cfg(target_arch = "wasm32")]
pub fn data_dir() -> Option<PathBuf> {
    None
}

/// The default record store for this platform
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store(dir: Option<PathBuf>) -> crate::persistence::FileStore {
    let dir = dir.or_else(data_dir).unwrap_or_else(|| PathBuf::from("."));
    log::info!("Storing records in {}", dir.display());
    crate::persistence::FileStore::new(dir)
}

#[cfg(target_arch = "wasm32")]
pub fn default_store(_dir: Option<PathBuf>) -> crate::persistence::LocalStorageStore {
    crate::persistence::LocalStorageStore::new()
}
