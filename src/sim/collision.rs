//! Collision queries between the ball and the level geometry
//!
//! All queries are stateless and evaluated independently every tick. Support and
//! fatal checks never short-circuit each other: a ball that is standing on a stair
//! while overlapping a block is still dead.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::geometry::{BoxKind, BoxObstacle, Cone, Pad, Star, WorldGeometry};

/// Result of a support query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Support {
    /// Index into `WorldGeometry::boxes`
    pub index: usize,
    /// Height of the supporting top surface
    pub top: f32,
}

/// What killed the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FatalHit {
    /// Index into `WorldGeometry::boxes`
    Block(usize),
    /// Index into `WorldGeometry::cones`
    Cone(usize),
}

/// (x, z) footprint of a 3D point
#[inline]
fn footprint(p: Vec3) -> Vec2 {
    Vec2::new(p.x, p.z)
}

/// Check whether the ball stands on (or inside the band of) a supportive box
///
/// The ball's (x, z) must lie within the footprint and its y within
/// `[base, base + height]`. Solid boxes never support.
pub fn ball_box_support(ball_pos: Vec3, obstacle: &BoxObstacle) -> Option<f32> {
    let BoxKind::Supportive { height, .. } = obstacle.kind else {
        return None;
    };
    let c = obstacle.center;
    let h = obstacle.half_extent;
    let in_footprint = (ball_pos.x - c.x).abs() < h && (ball_pos.z - c.z).abs() < h;
    let in_band = c.y <= ball_pos.y && ball_pos.y <= c.y + height;
    (in_footprint && in_band).then_some(c.y + height)
}

/// First stair supporting the ball (stairs are assumed not to overlap in x)
pub fn find_support(ball_pos: Vec3, world: &WorldGeometry) -> Option<Support> {
    world
        .boxes
        .iter()
        .enumerate()
        .find_map(|(index, b)| ball_box_support(ball_pos, b).map(|top| Support { index, top }))
}

/// Check whether the ball centre lies strictly inside a solid box
pub fn ball_block_overlap(ball_pos: Vec3, obstacle: &BoxObstacle) -> bool {
    match obstacle.kind {
        BoxKind::Solid => {
            let d = (ball_pos - obstacle.center).abs();
            d.max_element() < obstacle.half_extent
        }
        BoxKind::Supportive { .. } => false,
    }
}

/// Check whether the ball is inside a cone's danger zone
///
/// The footprint test is a circle overlap in (x, z); the vertical test depends on
/// which way the cone points.
pub fn ball_cone_overlap(ball_pos: Vec3, ball_radius: f32, cone: &Cone) -> bool {
    let reach = ball_radius + cone.base_radius;
    footprint(ball_pos).distance_squared(footprint(cone.pos)) < reach * reach
        && cone.danger_band_contains(ball_pos.y)
}

/// First fatal overlap, blocks before cones
///
/// Which obstacle gets reported when several overlap at once follows scan order;
/// callers should only rely on `is_some()`.
pub fn find_fatal(ball_pos: Vec3, ball_radius: f32, world: &WorldGeometry) -> Option<FatalHit> {
    if let Some(index) = world
        .boxes
        .iter()
        .position(|b| ball_block_overlap(ball_pos, b))
    {
        return Some(FatalHit::Block(index));
    }
    world
        .cones
        .iter()
        .position(|c| ball_cone_overlap(ball_pos, ball_radius, c))
        .map(FatalHit::Cone)
}

/// Check whether the ball touches an uncollected star (3D distance)
pub fn ball_star_pickup(ball_pos: Vec3, ball_radius: f32, star: &Star) -> bool {
    !star.collected && ball_pos.distance(star.pos) < ball_radius + star.size
}

/// Indices of every uncollected star the ball touches
pub fn star_pickups(ball_pos: Vec3, ball_radius: f32, world: &WorldGeometry) -> Vec<usize> {
    world
        .stars
        .iter()
        .enumerate()
        .filter(|(_, s)| ball_star_pickup(ball_pos, ball_radius, s))
        .map(|(i, _)| i)
        .collect()
}

/// Check whether the ball is on a bounce pad
///
/// The pad is a half sphere: footprint circle overlap in (x, z), and the ball
/// centre at or below the dome top.
pub fn ball_pad_contact(ball_pos: Vec3, ball_radius: f32, pad: &Pad) -> bool {
    let reach = ball_radius + pad.radius;
    footprint(ball_pos).distance_squared(footprint(pad.pos)) < reach * reach
        && ball_pos.y <= pad.pos.y + pad.radius
}

/// Index of the first pad the ball touches
pub fn find_pad_contact(ball_pos: Vec3, ball_radius: f32, world: &WorldGeometry) -> Option<usize> {
    world
        .pads
        .iter()
        .position(|p| ball_pad_contact(ball_pos, ball_radius, p))
}
