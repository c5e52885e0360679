//! Browser entry point
//!
//! Exposes a [`Session`] backed by LocalStorage to the host page. The page
//! calls `frame` once per animation frame with the elapsed time and reads the
//! snapshot back as JSON for drawing.

use wasm_bindgen::prelude::*;

use crate::persistence::LocalStorageStore;
use crate::timestep::FixedTimestep;
use crate::{LevelId, ScoreBoard, Session, Settings, platform};

#[wasm_bindgen(start)]
pub fn start() {
    platform::init_logging();
    log::info!("Ball Runner (web) starting...");
}

#[wasm_bindgen]
pub struct WebSession {
    session: Session<LocalStorageStore>,
    settings: Settings,
    timestep: FixedTimestep,
}

#[wasm_bindgen]
impl WebSession {
    /// `level` is `"easy"`, `"medium"` or `"hard"`; anything else uses the saved choice
    #[wasm_bindgen(constructor)]
    pub fn new(level: Option<String>) -> WebSession {
        let mut settings = Settings::load();
        if let Some(id) = level.as_deref().and_then(LevelId::from_str) {
            settings.level = id;
        }
        let mut session = Session::builtin(settings.level, platform::default_store(None));
        session.set_autopilot(settings.autopilot);
        let timestep = FixedTimestep::from_hz(settings.tick_hz, settings.max_substeps);
        WebSession {
            session,
            settings,
            timestep,
        }
    }

    pub fn jump(&mut self) {
        self.session.request_jump();
    }

    pub fn restart(&mut self) {
        self.session.request_restart();
    }

    /// Toggle demo mode and remember the choice
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.session.set_autopilot(enabled);
        self.settings.autopilot = enabled;
        self.settings.save();
    }

    /// Run the ticks owed for `elapsed` seconds; returns the raised events as JSON
    pub fn frame(&mut self, elapsed: f32) -> String {
        let substeps = self.timestep.advance(elapsed);
        let events: Vec<_> = (0..substeps).flat_map(|_| self.session.advance()).collect();
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::warn!("Failed to encode events: {}", e);
            "[]".to_string()
        })
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.session.snapshot()).unwrap_or_else(|e| {
            log::warn!("Failed to encode snapshot: {}", e);
            "null".to_string()
        })
    }

    pub fn hud_text(&self) -> String {
        self.session.snapshot().hud_text()
    }

    pub fn score_board(&self) -> String {
        ScoreBoard::load(self.session.store()).render()
    }
}
