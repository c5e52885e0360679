//! Game state and core simulation types
//!
//! All state that must survive a restart cycle (or be shown by a renderer) lives here.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::FatalHit;
use super::geometry::WorldGeometry;
use crate::consts::*;

/// Per-level physics and pacing constants
///
/// All velocities and accelerations are per tick; the simulation has no `dt`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub horizontal_speed: f32,
    /// Vertical acceleration while in a jump arc (negative)
    pub gravity: f32,
    pub jump_impulse: f32,
    /// Jump impulse granted by a bounce pad
    pub pad_impulse: f32,
    /// Multiplier applied to `gravity` when dropping off a ledge without a jump
    pub fall_multiplier: f32,
    pub landing_offset: f32,
    pub start_x: f32,
    /// The run is won once the ball passes this x
    pub finish_x: f32,
    pub base_height: f32,
    pub ball_radius: f32,
    /// Fixed z of the ball for the level
    pub lane_z: f32,
    pub star_value: u32,
    /// Pad color animation step, degrees per tick
    pub pad_phase_step: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            horizontal_speed: HORIZONTAL_SPEED,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            pad_impulse: PAD_IMPULSE,
            fall_multiplier: FALL_MULTIPLIER,
            landing_offset: LANDING_OFFSET,
            start_x: START_X,
            finish_x: FINISH_X,
            base_height: BASE_HEIGHT,
            ball_radius: BALL_RADIUS,
            lane_z: LANE_Z,
            star_value: STAR_VALUE,
            pad_phase_step: PAD_PHASE_STEP,
        }
    }
}

impl Tuning {
    /// Where the ball rests before the run starts
    pub fn start_position(&self) -> Vec3 {
        Vec3::new(self.start_x, self.base_height, self.lane_z)
    }
}

/// The player's ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec3,
    pub vertical_vel: f32,
    pub radius: f32,
    /// A jump arc is in progress
    pub airborne: bool,
    /// Resting on a stair this tick (recomputed every tick)
    pub supported: bool,
    /// Visual roll angle in degrees
    pub roll: f32,
}

impl Ball {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.start_position(),
            vertical_vel: 0.0,
            radius: tuning.ball_radius,
            airborne: false,
            supported: false,
            roll: 0.0,
        }
    }

    /// Start a jump arc. Ignored while already mid-air, unless standing on a stair.
    ///
    /// Returns true if the jump took effect.
    pub fn jump(&mut self, impulse: f32) -> bool {
        if self.supported || !self.airborne {
            self.airborne = true;
            self.vertical_vel = impulse;
            true
        } else {
            false
        }
    }

    /// Bounce pad boost. Never stacks on an arc already in progress.
    ///
    /// Returns true if the boost took effect.
    pub fn double_jump(&mut self, impulse: f32) -> bool {
        if self.airborne {
            return false;
        }
        self.airborne = true;
        self.vertical_vel = impulse;
        true
    }

    /// Stop vertical motion at the given height
    pub fn land(&mut self, y: f32) {
        self.pos.y = y;
        self.airborne = false;
        self.vertical_vel = 0.0;
    }

    /// Return to the level start
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }
}

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// World is static until the first jump request
    #[default]
    Waiting,
    /// Ball is moving
    Running,
    /// Ball passed the finish line
    Won,
    /// Ball hit a block or cone
    Lost,
}

impl RunPhase {
    /// Won and Lost only exit through an explicit restart
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::Won | RunPhase::Lost)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunPhase::Waiting => "Waiting",
            RunPhase::Running => "Running",
            RunPhase::Won => "Won",
            RunPhase::Lost => "Lost",
        }
    }
}

/// Score and progress bookkeeping for the current run plus the persisted records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunState {
    pub phase: RunPhase,
    /// Points from stars this run
    pub score: u32,
    /// Distance moved this run
    pub distance: f32,
    /// Best distance ever reached on this level
    pub high_score: f32,
    /// Points of the most recently finished run (overwritten, never summed)
    pub points_total: u32,
}

impl RunState {
    /// Fresh run with the persisted records carried over
    pub fn new(high_score: f32, points_total: u32) -> Self {
        Self {
            high_score,
            points_total,
            ..Default::default()
        }
    }

    /// Enter a terminal phase and fold this run into the records
    ///
    /// Returns true if the high score improved.
    pub fn finish(&mut self, phase: RunPhase) -> bool {
        debug_assert!(phase.is_terminal());
        self.phase = phase;
        self.points_total = self.score;
        if self.distance > self.high_score {
            self.high_score = self.distance;
            true
        } else {
            false
        }
    }

    /// Clear per-run fields, keep the records
    pub fn reset(&mut self) {
        self.phase = RunPhase::Waiting;
        self.score = 0;
        self.distance = 0.0;
    }
}

/// Notable things that happened during a tick (for audio/UI collaborators)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First jump request left the waiting state
    Started,
    Jumped,
    /// Bounce pad boost (pad index)
    DoubleJump { pad: usize },
    StarCollected { star: usize, score: u32 },
    Won,
    Lost { cause: FatalHit },
    /// Records to persist after a terminal transition
    RunEnded {
        phase: RunPhase,
        distance: f32,
        score: u32,
        high_score: f32,
        new_high_score: bool,
    },
    Restarted,
}

/// Complete game state for one level session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub ball: Ball,
    pub world: WorldGeometry,
    pub run: RunState,
    /// Simulation tick counter (all ticks, including waiting)
    pub time_ticks: u64,
    /// Ticks spent in the Running phase this run
    pub run_ticks: u64,
    /// Pristine copy of the level geometry, restored on restart
    initial_world: WorldGeometry,
    /// Events raised by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh session in the waiting state
    pub fn new(tuning: Tuning, world: WorldGeometry) -> Self {
        Self {
            tuning,
            ball: Ball::new(&tuning),
            initial_world: world.clone(),
            world,
            run: RunState::default(),
            time_ticks: 0,
            run_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Create a session that carries previously persisted records
    pub fn with_records(
        tuning: Tuning,
        world: WorldGeometry,
        high_score: f32,
        points_total: u32,
    ) -> Self {
        let mut state = Self::new(tuning, world);
        state.run = RunState::new(high_score, points_total);
        state
    }

    /// Full reset to the waiting state. Persisted records are untouched.
    pub fn restart(&mut self) {
        self.ball.reset(&self.tuning);
        self.world = self.initial_world.clone();
        self.world.reset_stars();
        self.run.reset();
        self.run_ticks = 0;
        self.events.push(GameEvent::Restarted);
    }

    /// Fraction of the course covered, 0-1
    pub fn progress(&self) -> f32 {
        let span = self.tuning.finish_x - self.tuning.start_x;
        if span <= 0.0 {
            return 1.0;
        }
        ((self.ball.pos.x - self.tuning.start_x) / span).clamp(0.0, 1.0)
    }

    /// Drain events raised since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Star;

    #[test]
    fn test_jump_gating() {
        let tuning = Tuning::default();
        let mut ball = Ball::new(&tuning);
        assert!(ball.jump(0.113));
        assert!(ball.airborne);
        ball.vertical_vel = 0.05;
        // Already mid-air and unsupported: ignored
        assert!(!ball.jump(0.113));
        assert!((ball.vertical_vel - 0.05).abs() < 1e-6);
        // Standing on a stair allows a fresh jump
        ball.supported = true;
        assert!(ball.jump(0.113));
        assert!((ball.vertical_vel - 0.113).abs() < 1e-6);
    }

    #[test]
    fn test_double_jump_only_from_ground() {
        let tuning = Tuning::default();
        let mut ball = Ball::new(&tuning);
        assert!(ball.double_jump(0.18));
        ball.vertical_vel = 0.02;
        assert!(!ball.double_jump(0.18));
        assert!((ball.vertical_vel - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_run_state_finish_keeps_best_distance() {
        let mut run = RunState::new(5.0, 30);
        run.distance = 3.0;
        run.score = 10;
        assert!(!run.finish(RunPhase::Lost));
        assert_eq!(run.high_score, 5.0);
        // Points are overwritten, not accumulated
        assert_eq!(run.points_total, 10);

        run.reset();
        assert_eq!(run.phase, RunPhase::Waiting);
        run.distance = 7.5;
        assert!(run.finish(RunPhase::Won));
        assert_eq!(run.high_score, 7.5);
        assert_eq!(run.points_total, 0);
    }

    #[test]
    fn test_restart_restores_world() {
        let world = WorldGeometry {
            stars: vec![Star::new(Vec3::new(3.0, 0.1, 0.55), 0.1)],
            ..Default::default()
        };
        let mut state = GameState::with_records(Tuning::default(), world, 4.0, 20);
        state.world.stars[0].collected = true;
        state.run.score = 10;
        state.run.distance = 2.0;
        state.run.phase = RunPhase::Lost;
        state.ball.pos.x = 3.2;

        state.restart();
        assert!(!state.world.stars[0].collected);
        assert_eq!(state.run.score, 0);
        assert_eq!(state.run.distance, 0.0);
        assert_eq!(state.run.phase, RunPhase::Waiting);
        assert_eq!(state.ball.pos, state.tuning.start_position());
        assert_eq!(state.run.high_score, 4.0);
        assert_eq!(state.take_events(), vec![GameEvent::Restarted]);
    }

    #[test]
    fn test_progress_clamped() {
        let mut state = GameState::new(Tuning::default(), WorldGeometry::default());
        assert_eq!(state.progress(), 0.0);
        state.ball.pos.x = 8.1;
        assert!((state.progress() - 0.5).abs() < 1e-4);
        state.ball.pos.x = 20.0;
        assert_eq!(state.progress(), 1.0);
    }
}
