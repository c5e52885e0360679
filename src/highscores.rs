//! Per-level score board
//!
//! Collects the persisted records of every built-in level for a score screen:
//! best distance and a star rating earned from the last run's points.

use serde::{Deserialize, Serialize};

use crate::levels::LevelId;
use crate::persistence::{RecordKeys, ScoreStore};

/// Most stars a level can award
pub const MAX_STARS: u32 = 3;

/// Points needed per awarded star
pub const POINTS_PER_STAR: u32 = 10;

/// Persisted records for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelRecord {
    pub level: LevelId,
    /// Best distance, `None` if the level was never finished
    pub high_score: Option<f32>,
    /// Points of the last finished run
    pub points: u32,
}

impl LevelRecord {
    /// Load one level's records, treating unreadable values as absent
    pub fn load(level: LevelId, store: &impl ScoreStore) -> Self {
        let keys = RecordKeys::for_level(level);
        let high_score = store.load_high_score(&keys.high_score).unwrap_or_else(|e| {
            log::warn!("{}: ignoring high score: {}", level.as_str(), e);
            None
        });
        let points = store
            .load_points_total(&keys.points)
            .unwrap_or_else(|e| {
                log::warn!("{}: ignoring points: {}", level.as_str(), e);
                None
            })
            .unwrap_or(0);
        Self {
            level,
            high_score,
            points,
        }
    }

    pub fn stars_earned(&self) -> u32 {
        (self.points / POINTS_PER_STAR).min(MAX_STARS)
    }

    /// Filled then empty stars, e.g. `★★☆`
    pub fn star_string(&self) -> String {
        let earned = self.stars_earned() as usize;
        let mut s = "★".repeat(earned);
        s.push_str(&"☆".repeat(MAX_STARS as usize - earned));
        s
    }

    pub fn high_score_text(&self) -> String {
        match self.high_score {
            Some(distance) => format!("{:.2}", distance),
            None => "N/A".to_string(),
        }
    }
}

/// Records for all built-in levels, in level order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub records: Vec<LevelRecord>,
}

impl ScoreBoard {
    pub fn load(store: &impl ScoreStore) -> Self {
        let records = LevelId::ALL
            .iter()
            .map(|&level| LevelRecord::load(level, store))
            .collect();
        Self { records }
    }

    pub fn get(&self, level: LevelId) -> Option<&LevelRecord> {
        self.records.iter().find(|r| r.level == level)
    }

    /// Total stars earned across all levels
    pub fn total_stars(&self) -> u32 {
        self.records.iter().map(LevelRecord::stars_earned).sum()
    }

    /// One line per level: name, best distance, star rating
    pub fn render(&self) -> String {
        self.records
            .iter()
            .map(|r| {
                format!(
                    "{:<8} Highest: {:>6}  {}",
                    r.level.as_str(),
                    r.high_score_text(),
                    r.star_string()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
