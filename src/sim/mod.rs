//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (every constant is per tick)
//! - Stable iteration order (level declaration order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod geometry;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{FatalHit, Support, find_fatal, find_pad_contact, find_support, star_pickups};
pub use geometry::{BoxKind, BoxObstacle, Cone, ConeOrientation, Pad, Star, WorldGeometry};
pub use snapshot::Snapshot;
pub use state::{Ball, GameEvent, GameState, RunPhase, RunState, Tuning};
pub use tick::{AUTOPILOT_LOOKAHEAD, TickInput, tick};
