//! Read-only view of the simulation for renderers and HUDs

use glam::Vec3;
use serde::Serialize;

use super::geometry::ConeOrientation;
use super::state::{GameState, RunPhase};

#[derive(Debug, Clone, Serialize)]
pub struct BallView {
    pub pos: Vec3,
    pub radius: f32,
    pub roll: f32,
    pub airborne: bool,
    pub supported: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoxView {
    pub center: Vec3,
    pub half_extent: f32,
    /// `None` for solid blocks
    pub stair_height: Option<f32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StarView {
    pub pos: Vec3,
    pub size: f32,
    pub collected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConeView {
    pub pos: Vec3,
    pub base_radius: f32,
    pub height: f32,
    pub orientation: ConeOrientation,
}

#[derive(Debug, Clone, Serialize)]
pub struct PadView {
    pub pos: Vec3,
    pub radius: f32,
    pub phase: f32,
    pub color: [f32; 3],
}

/// Everything a renderer or HUD needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: RunPhase,
    pub ball: BallView,
    pub boxes: Vec<BoxView>,
    pub stars: Vec<StarView>,
    pub cones: Vec<ConeView>,
    pub pads: Vec<PadView>,
    pub score: u32,
    pub distance: f32,
    pub high_score: f32,
    pub points_total: u32,
    /// Fraction of the course covered, 0-1
    pub progress: f32,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let ball = &state.ball;
        let world = &state.world;
        Self {
            tick: state.time_ticks,
            phase: state.run.phase,
            ball: BallView {
                pos: ball.pos,
                radius: ball.radius,
                roll: ball.roll,
                airborne: ball.airborne,
                supported: ball.supported,
            },
            boxes: world
                .boxes
                .iter()
                .map(|b| BoxView {
                    center: b.center,
                    half_extent: b.half_extent,
                    stair_height: b.support_top().map(|top| top - b.center.y),
                })
                .collect(),
            stars: world
                .stars
                .iter()
                .map(|s| StarView {
                    pos: s.pos,
                    size: s.size,
                    collected: s.collected,
                })
                .collect(),
            cones: world
                .cones
                .iter()
                .map(|c| ConeView {
                    pos: c.pos,
                    base_radius: c.base_radius,
                    height: c.height,
                    orientation: c.orientation,
                })
                .collect(),
            pads: world
                .pads
                .iter()
                .map(|p| PadView {
                    pos: p.pos,
                    radius: p.radius,
                    phase: p.phase,
                    color: p.color(),
                })
                .collect(),
            score: state.run.score,
            distance: state.run.distance,
            high_score: state.run.high_score,
            points_total: state.run.points_total,
            progress: state.progress(),
        }
    }

    /// HUD line, e.g. `Dist: 3.40  Highest: 7.12  Points: 10`
    pub fn hud_text(&self) -> String {
        format!(
            "Dist: {:.2}  Highest: {:.2}  Points: {}",
            self.distance, self.high_score, self.score
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::{BoxObstacle, Pad, Star, WorldGeometry};
    use crate::sim::state::Tuning;

    #[test]
    fn test_capture_mirrors_state() {
        let world = WorldGeometry {
            boxes: vec![
                BoxObstacle::block(Vec3::new(3.5, 0.2, 0.6), 0.2),
                BoxObstacle::stair(Vec3::new(6.0, 0.4, 0.6), 0.2, 0.2, 0.2),
            ],
            stars: vec![Star::new(Vec3::new(6.0, 0.8, 0.6), 0.1)],
            pads: vec![Pad::new(Vec3::new(13.0, 0.01, 0.5), 0.1)],
            ..Default::default()
        };
        let mut state = GameState::new(Tuning::default(), world);
        state.world.stars[0].collected = true;
        state.run.score = 10;

        let snap = Snapshot::capture(&state);
        assert_eq!(snap.phase, RunPhase::Waiting);
        assert_eq!(snap.boxes.len(), 2);
        assert!(snap.boxes[0].stair_height.is_none());
        assert!((snap.boxes[1].stair_height.unwrap() - 0.2).abs() < 1e-6);
        assert!(snap.stars[0].collected);
        assert_eq!(snap.pads.len(), 1);
        assert_eq!(snap.hud_text(), "Dist: 0.00  Highest: 0.00  Points: 10");
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(Tuning::default(), WorldGeometry::default());
        let json = serde_json::to_string(&Snapshot::capture(&state)).unwrap();
        assert!(json.contains("\"phase\":\"Waiting\""));
    }
}
