//! Level definitions
//!
//! A level is tuning constants plus an obstacle layout. The three built-in
//! levels share one simulation; custom levels can be loaded from JSON files
//! with the same schema as [`LevelDef`].

use std::fmt;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::sim::{BoxObstacle, Cone, GameState, Pad, Star, Tuning, WorldGeometry};

/// Built-in level selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LevelId {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl LevelId {
    pub const ALL: [LevelId; 3] = [LevelId::Easy, LevelId::Medium, LevelId::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            LevelId::Easy => "Easy",
            LevelId::Medium => "Medium",
            LevelId::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "1" => Some(LevelId::Easy),
            "medium" | "med" | "2" => Some(LevelId::Medium),
            "hard" | "3" => Some(LevelId::Hard),
            _ => None,
        }
    }

    /// Storage key for the best distance on this level
    pub fn high_score_key(&self) -> &'static str {
        match self {
            LevelId::Easy => "high_score",
            LevelId::Medium => "high_score_lv2",
            LevelId::Hard => "high_score_lv3",
        }
    }

    /// Storage key for the points of the last finished run
    pub fn points_key(&self) -> &'static str {
        match self {
            LevelId::Easy => "points_collected",
            LevelId::Medium => "points_collected_lv2",
            LevelId::Hard => "points_collected_lv3",
        }
    }

    pub fn definition(&self) -> LevelDef {
        match self {
            LevelId::Easy => easy(),
            LevelId::Medium => medium(),
            LevelId::Hard => hard(),
        }
    }
}

/// Errors loading a custom level
#[derive(Debug)]
pub enum LevelError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Io(e) => write!(f, "failed to read level: {}", e),
            LevelError::Json(e) => write!(f, "malformed level file: {}", e),
            LevelError::Invalid(msg) => write!(f, "invalid level: {}", msg),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Io(e) => Some(e),
            LevelError::Json(e) => Some(e),
            LevelError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        LevelError::Io(e)
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(e: serde_json::Error) -> Self {
        LevelError::Json(e)
    }
}

/// A complete level: pacing/physics constants and obstacle layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    pub name: String,
    #[serde(default)]
    pub tuning: Tuning,
    #[serde(default)]
    pub world: WorldGeometry,
}

impl LevelDef {
    /// Parse and validate a level from JSON
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: LevelDef = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Load and validate a level file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let level = Self::from_json(&json)?;
        log::info!(
            "Loaded level '{}' from {} ({} boxes, {} cones, {} stars, {} pads)",
            level.name,
            path.as_ref().display(),
            level.world.boxes.len(),
            level.world.cones.len(),
            level.world.stars.len(),
            level.world.pads.len()
        );
        Ok(level)
    }

    /// Reject tunings the simulation cannot make progress with
    pub fn validate(&self) -> Result<(), LevelError> {
        let t = &self.tuning;
        if t.horizontal_speed <= 0.0 {
            return Err(LevelError::Invalid("horizontal_speed must be positive".into()));
        }
        if t.gravity >= 0.0 {
            return Err(LevelError::Invalid("gravity must be negative".into()));
        }
        if t.jump_impulse <= 0.0 || t.pad_impulse <= 0.0 {
            return Err(LevelError::Invalid("jump impulses must be positive".into()));
        }
        if t.finish_x <= t.start_x {
            return Err(LevelError::Invalid("finish_x must lie beyond start_x".into()));
        }
        if t.ball_radius <= 0.0 {
            return Err(LevelError::Invalid("ball_radius must be positive".into()));
        }
        Ok(())
    }

    /// Fresh session state for this level with persisted records
    pub fn new_state(&self, high_score: f32, points_total: u32) -> GameState {
        GameState::with_records(self.tuning, self.world.clone(), high_score, points_total)
    }
}

/// Blocks along the lane at a fixed height, `step` apart
fn block_run(xs: impl IntoIterator<Item = f32>, y: f32, z: f32, half: f32) -> Vec<BoxObstacle> {
    xs.into_iter()
        .map(|x| BoxObstacle::block(Vec3::new(x, y, z), half))
        .collect()
}

/// `count` evenly spaced x positions starting at `start`
fn spaced(start: f32, step: f32, count: usize) -> impl Iterator<Item = f32> {
    (0..count).map(move |i| start + step * i as f32)
}

fn easy() -> LevelDef {
    let mut boxes = block_run([9.0], 0.2, 0.6, 0.2);
    boxes.extend([
        BoxObstacle::stair(Vec3::new(11.0, 0.0, 0.6), 0.2, 0.2, 0.2),
        BoxObstacle::stair(Vec3::new(11.4, 0.0, 0.6), 0.2, 0.3, 0.2),
    ]);

    LevelDef {
        name: "EASY".into(),
        tuning: Tuning::default(),
        world: WorldGeometry {
            boxes,
            stars: vec![
                Star::new(Vec3::new(3.0, 0.8, 0.6), 0.1),
                Star::new(Vec3::new(9.0, 0.8, 0.6), 0.1),
                Star::new(Vec3::new(12.5, 0.2, 0.6), 0.1),
            ],
            cones: vec![
                Cone::upright(Vec3::new(3.0, 0.1, 0.6), 0.1, 0.3),
                Cone::upright(Vec3::new(6.5, 0.1, 0.6), 0.1, 0.3),
            ],
            pads: vec![Pad::new(Vec3::new(13.5, 0.01, 0.5), 0.1)],
        },
    }
}

fn medium() -> LevelDef {
    let stair_xs = || spaced(6.0, 0.2, 6).chain(spaced(7.6, 0.2, 6));

    let mut boxes = block_run([3.5], 0.2, 0.6, 0.2);
    boxes.extend(block_run([10.0, 11.0], 1.1, 0.6, 0.2));
    // Solid bases under the stair runs
    boxes.extend(block_run(stair_xs(), 0.2, 0.6, 0.2));
    boxes.extend(stair_xs().map(|x| BoxObstacle::stair(Vec3::new(x, 0.4, 0.6), 0.2, 0.2, 0.2)));
    // Descending steps before the finish
    boxes.extend([
        BoxObstacle::stair(Vec3::new(13.5, 0.6, 0.6), 0.2, 0.1, 0.2),
        BoxObstacle::stair(Vec3::new(13.9, 0.5, 0.6), 0.2, 0.1, 0.2),
        BoxObstacle::stair(Vec3::new(14.3, 0.4, 0.6), 0.2, 0.1, 0.2),
    ]);

    LevelDef {
        name: "MEDIUM".into(),
        tuning: Tuning::default(),
        world: WorldGeometry {
            boxes,
            stars: vec![
                Star::new(Vec3::new(6.0, 0.8, 0.6), 0.1),
                Star::new(Vec3::new(11.0, 0.2, 0.6), 0.1),
                Star::new(Vec3::new(14.3, 0.8, 0.6), 0.1),
            ],
            cones: vec![
                Cone::upright(Vec3::new(2.5, 0.1, 0.6), 0.1, 0.3),
                Cone::upright(Vec3::new(4.5, 0.1, 0.6), 0.1, 0.3),
                Cone::hanging(Vec3::new(10.0, 1.0, 0.6), 0.1, 0.3),
                Cone::hanging(Vec3::new(11.0, 1.0, 0.6), 0.1, 0.3),
                Cone::upright(Vec3::new(7.2, 0.1, 0.6), 0.1, 0.3),
                Cone::upright(Vec3::new(7.4, 0.1, 0.6), 0.1, 0.3),
                Cone::upright(Vec3::new(8.0, 0.6, 0.65), 0.1, 0.3),
                Cone::upright(Vec3::new(10.5, 0.1, 0.6), 0.1, 0.3),
                Cone::upright(Vec3::new(11.5, 0.1, 0.6), 0.1, 0.3),
            ],
            pads: vec![Pad::new(Vec3::new(13.0, 0.01, 0.5), 0.1)],
        },
    }
}

fn hard() -> LevelDef {
    let stair_xs = || spaced(7.0, 0.2, 8);

    let mut boxes = block_run([3.0, 5.0, 5.2], 0.2, 0.6, 0.2);
    boxes.extend(block_run([12.0], 1.1, 0.6, 0.2));
    boxes.extend(block_run(stair_xs(), 0.2, 0.6, 0.2));
    boxes.extend(stair_xs().map(|x| BoxObstacle::stair(Vec3::new(x, 0.4, 0.6), 0.2, 0.2, 0.2)));
    boxes.extend([
        BoxObstacle::stair(Vec3::new(13.4, 0.6, 0.6), 0.2, 0.1, 0.2),
        BoxObstacle::stair(Vec3::new(13.8, 0.5, 0.6), 0.2, 0.1, 0.2),
        BoxObstacle::stair(Vec3::new(14.2, 0.4, 0.6), 0.2, 0.1, 0.2),
    ]);

    LevelDef {
        name: "HARD".into(),
        tuning: Tuning {
            horizontal_speed: 0.024,
            ..Tuning::default()
        },
        world: WorldGeometry {
            boxes,
            stars: vec![
                Star::new(Vec3::new(4.0, 0.8, 0.6), 0.1),
                Star::new(Vec3::new(7.8, 0.9, 0.6), 0.1),
                Star::new(Vec3::new(11.0, 0.7, 0.6), 0.1),
            ],
            cones: vec![
                Cone::upright(Vec3::new(2.2, 0.1, 0.6), 0.1, 0.3),
                Cone::upright(Vec3::new(4.0, 0.1, 0.6), 0.1, 0.3),
                Cone::upright(Vec3::new(6.0, 0.1, 0.6), 0.1, 0.3),
                Cone::upright(Vec3::new(7.6, 0.6, 0.65), 0.1, 0.3),
                Cone::upright(Vec3::new(9.5, 0.1, 0.6), 0.1, 0.3),
                Cone::hanging(Vec3::new(10.5, 1.0, 0.6), 0.1, 0.3),
                Cone::upright(Vec3::new(11.0, 0.1, 0.6), 0.1, 0.3),
                Cone::hanging(Vec3::new(11.5, 1.0, 0.6), 0.1, 0.3),
                Cone::upright(Vec3::new(12.5, 0.1, 0.6), 0.1, 0.3),
            ],
            pads: vec![Pad::new(Vec3::new(10.0, 0.01, 0.5), 0.1)],
        },
    }
}
