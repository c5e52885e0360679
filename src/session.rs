//! Game session: the input/tick/observation surface of one level
//!
//! Wraps a [`GameState`] with buffered input requests and writes the records
//! raised by a finished run to a [`ScoreStore`]. Storage failures are logged
//! and never reach the simulation.

use crate::levels::{LevelDef, LevelId};
use crate::persistence::{RecordKeys, ScoreStore};
use crate::sim::{GameEvent, GameState, RunPhase, Snapshot, TickInput, tick};

pub struct Session<S: ScoreStore> {
    state: GameState,
    store: S,
    keys: RecordKeys,
    /// One-shot requests applied on the next `advance`
    pending: TickInput,
    autopilot: bool,
}

impl<S: ScoreStore> Session<S> {
    /// Start a session, loading the level's records from `store`
    ///
    /// Unreadable records fall back to no high score and zero points.
    pub fn new(level: &LevelDef, keys: RecordKeys, store: S) -> Self {
        let high_score = store
            .load_high_score(&keys.high_score)
            .unwrap_or_else(|e| {
                log::warn!("Could not load high score: {}", e);
                None
            })
            .unwrap_or(0.0);
        let points_total = store
            .load_points_total(&keys.points)
            .unwrap_or_else(|e| {
                log::warn!("Could not load points: {}", e);
                None
            })
            .unwrap_or(0);

        log::info!(
            "Session started: level {} (highest {:.2}, points {})",
            level.name,
            high_score,
            points_total
        );

        Self {
            state: level.new_state(high_score, points_total),
            store,
            keys,
            pending: TickInput::default(),
            autopilot: false,
        }
    }

    /// Session on a built-in level with its own record keys
    pub fn builtin(id: LevelId, store: S) -> Self {
        Self::new(&id.definition(), RecordKeys::for_level(id), store)
    }

    pub fn request_jump(&mut self) {
        self.pending.jump = true;
    }

    pub fn request_restart(&mut self) {
        self.pending.restart = true;
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Run one fixed tick and return the events it raised
    pub fn advance(&mut self) -> Vec<GameEvent> {
        let input = TickInput {
            autopilot: self.autopilot,
            ..std::mem::take(&mut self.pending)
        };
        tick(&mut self.state, &input);

        let events = self.state.take_events();
        for event in &events {
            self.handle_event(event);
        }
        events
    }

    fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Started => log::info!("Run started"),
            GameEvent::Restarted => log::info!("Run reset"),
            GameEvent::RunEnded {
                phase,
                distance,
                score,
                high_score,
                new_high_score,
            } => {
                log::info!(
                    "Run {}: distance {:.2}, points {}{}",
                    if *phase == RunPhase::Won { "won" } else { "lost" },
                    distance,
                    score,
                    if *new_high_score { " (new high score)" } else { "" }
                );
                self.persist(*high_score, *score, *new_high_score);
            }
            _ => {}
        }
    }

    fn persist(&mut self, high_score: f32, points: u32, new_high_score: bool) {
        if new_high_score {
            if let Err(e) = self.store.save_high_score(&self.keys.high_score, high_score) {
                log::warn!("Failed to save high score: {}", e);
            }
        }
        if let Err(e) = self.store.save_points_total(&self.keys.points, points) {
            log::warn!("Failed to save points: {}", e);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> RunPhase {
        self.state.run.phase
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
