//! Ball Runner - an auto-running 3D ball platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, collisions, run state)
//! - `levels`: Data-driven level definitions (tuning + obstacle layout)
//! - `session`: Input/tick/observation surface plus score persistence side effects
//! - `persistence`: High score and points storage
//! - `highscores`: Per-level score board (score screen data)
//! - `settings`: Persisted preferences
//! - `platform`: Native/browser differences (logging, data directory)
//! - `timestep`: Fixed timestep accumulator for real-time pacing
//! - `web`: wasm-bindgen surface for a browser host (wasm32 only)

pub mod highscores;
pub mod levels;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod timestep;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::{LevelRecord, ScoreBoard};
pub use levels::{LevelDef, LevelId};
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (the ball moves a fixed distance per tick)
    pub const TICK_HZ: f32 = 60.0;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_HZ;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.1;
    /// Resting height of the ball centre on flat ground
    pub const BASE_HEIGHT: f32 = 0.1;
    /// Ball z (lane centre)
    pub const LANE_Z: f32 = 0.55;
    pub const START_X: f32 = 1.2;
    pub const FINISH_X: f32 = 15.0;

    /// Horizontal advance per tick
    pub const HORIZONTAL_SPEED: f32 = 0.02;
    /// Vertical acceleration per tick while in a jump arc
    pub const GRAVITY: f32 = -0.007;
    /// Initial vertical velocity of a player jump
    pub const JUMP_IMPULSE: f32 = 0.113;
    /// Initial vertical velocity granted by a bounce pad
    pub const PAD_IMPULSE: f32 = 0.18;
    /// Drop per tick when walking off a ledge is `GRAVITY * FALL_MULTIPLIER`
    pub const FALL_MULTIPLIER: f32 = 15.0;
    /// Added to `stair_top - radius` when the ball lands on a stair
    pub const LANDING_OFFSET: f32 = 0.065;

    /// Points per collected star
    pub const STAR_VALUE: u32 = 10;
    /// Pad color animation step (degrees per tick)
    pub const PAD_PHASE_STEP: f32 = 5.0;
    /// Ball roll animation step (degrees per running tick)
    pub const ROLL_STEP: f32 = 10.0;
}
