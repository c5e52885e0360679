//! World geometry: the static obstacles, stairs, stars and pads of a level
//!
//! Everything here is fixed in shape and position for the whole session. The
//! only mutable parts are star `collected` flags and pad color phases, and both
//! are rebuilt from the level definition on restart.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// What an axis-aligned box does to the ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BoxKind {
    /// Fatal on any overlap with the ball centre
    Solid,
    /// The ball may stand on top; never fatal
    Supportive {
        /// Vertical extent above the box base
        height: f32,
        /// Visual depth (z scale), unused by collision
        depth: f32,
    },
}

/// An axis-aligned box obstacle
///
/// For `Solid` boxes `center` is the box centre and `half_extent` applies to all
/// three axes. For `Supportive` boxes `center.y` is the base of the box, the top
/// sits at `center.y + height`, and `half_extent` is the footprint in x and z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxObstacle {
    pub kind: BoxKind,
    pub center: Vec3,
    pub half_extent: f32,
}

impl BoxObstacle {
    pub fn block(center: Vec3, half_extent: f32) -> Self {
        Self {
            kind: BoxKind::Solid,
            center,
            half_extent,
        }
    }

    pub fn stair(base: Vec3, half_extent: f32, height: f32, depth: f32) -> Self {
        Self {
            kind: BoxKind::Supportive { height, depth },
            center: base,
            half_extent,
        }
    }

    #[inline]
    pub fn is_solid(&self) -> bool {
        matches!(self.kind, BoxKind::Solid)
    }

    /// Top surface height of a supportive box
    pub fn support_top(&self) -> Option<f32> {
        match self.kind {
            BoxKind::Supportive { height, .. } => Some(self.center.y + height),
            BoxKind::Solid => None,
        }
    }
}

/// A collectible star
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec3,
    pub size: f32,
    #[serde(default)]
    pub collected: bool,
}

impl Star {
    pub fn new(pos: Vec3, size: f32) -> Self {
        Self {
            pos,
            size,
            collected: false,
        }
    }
}

/// Which way a cone points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConeOrientation {
    /// Base on the ground, tip up
    #[default]
    Upright,
    /// Base anchored above, tip pointing down
    Hanging,
}

/// A cone obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cone {
    /// Base centre
    pub pos: Vec3,
    pub base_radius: f32,
    pub height: f32,
    #[serde(default)]
    pub orientation: ConeOrientation,
}

impl Cone {
    pub fn upright(pos: Vec3, base_radius: f32, height: f32) -> Self {
        Self {
            pos,
            base_radius,
            height,
            orientation: ConeOrientation::Upright,
        }
    }

    pub fn hanging(pos: Vec3, base_radius: f32, height: f32) -> Self {
        Self {
            pos,
            base_radius,
            height,
            orientation: ConeOrientation::Hanging,
        }
    }

    /// Whether a ball centre at height `y` lies in the cone's solid band
    pub fn danger_band_contains(&self, y: f32) -> bool {
        match self.orientation {
            ConeOrientation::Upright => y < self.pos.y + self.height,
            ConeOrientation::Hanging => self.pos.y - self.height < y && y < self.pos.y,
        }
    }
}

/// A half-sphere bounce pad that grants a double jump
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    pub pos: Vec3,
    pub radius: f32,
    /// Color animation phase in degrees (cosmetic only)
    #[serde(default)]
    pub phase: f32,
}

impl Pad {
    pub fn new(pos: Vec3, radius: f32) -> Self {
        Self {
            pos,
            radius,
            phase: 0.0,
        }
    }

    /// Advance the color animation, wrapping back into (0, 360]
    pub fn animate(&mut self, step_degrees: f32) {
        self.phase += step_degrees;
        if self.phase > 360.0 {
            self.phase -= 360.0;
        }
    }

    /// Current display color (RGB, each channel 0-1)
    pub fn color(&self) -> [f32; 3] {
        use std::f32::consts::TAU;
        let t = self.phase / 360.0;
        let channel = |k: f32| 0.5 * (1.0 + (TAU * (t + k / 3.0)).sin());
        [channel(0.0), channel(1.0), channel(2.0)]
    }
}

/// Everything the ball can interact with in a level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldGeometry {
    #[serde(default)]
    pub boxes: Vec<BoxObstacle>,
    /// Stars in the order they appear along the path
    #[serde(default)]
    pub stars: Vec<Star>,
    #[serde(default)]
    pub cones: Vec<Cone>,
    #[serde(default)]
    pub pads: Vec<Pad>,
}

impl WorldGeometry {
    /// Solid (fatal) boxes
    pub fn blocks(&self) -> impl Iterator<Item = &BoxObstacle> {
        self.boxes.iter().filter(|b| b.is_solid())
    }

    /// Supportive boxes the ball can stand on
    pub fn stairs(&self) -> impl Iterator<Item = &BoxObstacle> {
        self.boxes.iter().filter(|b| !b.is_solid())
    }

    /// Clear all star pickups
    pub fn reset_stars(&mut self) {
        for star in &mut self.stars {
            star.collected = false;
        }
    }

    pub fn stars_collected(&self) -> usize {
        self.stars.iter().filter(|s| s.collected).count()
    }

    /// Advance every pad's color animation by one tick
    pub fn animate_pads(&mut self, step_degrees: f32) {
        for pad in &mut self.pads {
            pad.animate(step_degrees);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_kind_filters() {
        let world = WorldGeometry {
            boxes: vec![
                BoxObstacle::block(Vec3::new(3.5, 0.2, 0.6), 0.2),
                BoxObstacle::stair(Vec3::new(6.0, 0.4, 0.6), 0.2, 0.2, 0.2),
            ],
            ..Default::default()
        };
        assert_eq!(world.blocks().count(), 1);
        assert_eq!(world.stairs().count(), 1);

        let stair = world.stairs().next().unwrap();
        assert!((stair.support_top().unwrap() - 0.6).abs() < 1e-6);
        assert!(world.blocks().next().unwrap().support_top().is_none());
    }

    #[test]
    fn test_cone_danger_bands() {
        let upright = Cone::upright(Vec3::new(2.5, 0.1, 0.6), 0.1, 0.3);
        assert!(upright.danger_band_contains(0.05));
        assert!(upright.danger_band_contains(0.39));
        assert!(!upright.danger_band_contains(0.45));

        let hanging = Cone::hanging(Vec3::new(10.0, 1.0, 0.6), 0.1, 0.3);
        assert!(!hanging.danger_band_contains(0.1));
        assert!(hanging.danger_band_contains(0.8));
        assert!(!hanging.danger_band_contains(0.65));
        assert!(!hanging.danger_band_contains(1.0));
    }

    #[test]
    fn test_pad_phase_wraps() {
        let mut pad = Pad::new(Vec3::new(13.0, 0.01, 0.5), 0.1);
        for _ in 0..72 {
            pad.animate(5.0);
        }
        // 72 * 5 = 360 stays at 360, the next step wraps
        assert!((pad.phase - 360.0).abs() < 1e-3);
        pad.animate(5.0);
        assert!((pad.phase - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_pad_color_in_range() {
        let mut pad = Pad::new(Vec3::ZERO, 0.1);
        for _ in 0..100 {
            pad.animate(5.0);
            for c in pad.color() {
                assert!((0.0..=1.0).contains(&c));
            }
        }
        let start = Pad::new(Vec3::ZERO, 0.1).color();
        assert!((start[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_reset_stars() {
        let mut world = WorldGeometry {
            stars: vec![Star::new(Vec3::ONE, 0.1), Star::new(Vec3::X, 0.1)],
            ..Default::default()
        };
        world.stars[1].collected = true;
        assert_eq!(world.stars_collected(), 1);
        world.reset_stars();
        assert_eq!(world.stars_collected(), 0);
    }
}
