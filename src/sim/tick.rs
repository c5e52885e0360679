//! Fixed timestep simulation tick
//!
//! Core game loop that advances the ball one step. Every constant is expressed
//! per tick, so there is no `dt` here: the driver is responsible for calling
//! `tick` at a fixed rate.

use super::collision::{FatalHit, find_fatal, find_pad_contact, find_support, star_pickups};
use super::geometry::ConeOrientation;
use super::state::{GameEvent, GameState, RunPhase};
use crate::consts::ROLL_STEP;

/// How far ahead of a hazard's leading edge the autopilot jumps
pub const AUTOPILOT_LOOKAHEAD: f32 = 0.12;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space). Also starts the run from the waiting state.
    pub jump: bool,
    /// Full reset back to the waiting state
    pub restart: bool,
    /// Demo mode - jump over ground hazards automatically
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    // Pads keep cycling color in every phase
    let phase_step = state.tuning.pad_phase_step;
    state.world.animate_pads(phase_step);

    if input.restart {
        log::debug!("Restart requested in {} phase", state.run.phase.as_str());
        state.restart();
        return;
    }

    let mut input = input.clone();
    if input.autopilot {
        match state.run.phase {
            // Auto-start from the waiting state
            RunPhase::Waiting => input.jump = true,
            RunPhase::Running => input.jump |= autopilot_wants_jump(state),
            _ => {}
        }
    }
    let input = &input;

    match state.run.phase {
        RunPhase::Waiting => {
            if !input.jump {
                return;
            }
            state.run.phase = RunPhase::Running;
            state.events.push(GameEvent::Started);
            try_jump(state);
        }
        RunPhase::Running => {
            if input.jump {
                try_jump(state);
            }
        }
        RunPhase::Won | RunPhase::Lost => return,
    }

    step_ball(state);
}

fn try_jump(state: &mut GameState) {
    let impulse = state.tuning.jump_impulse;
    if state.ball.jump(impulse) {
        state.events.push(GameEvent::Jumped);
    }
}

/// One running step: advance, integrate, resolve collisions
fn step_ball(state: &mut GameState) {
    let t = state.tuning;
    state.run_ticks += 1;

    // Horizontal motion is constant
    state.ball.pos.x += t.horizontal_speed;
    state.ball.roll = (state.ball.roll + ROLL_STEP) % 360.0;
    state.run.distance += t.horizontal_speed;

    if state.ball.pos.x > t.finish_x {
        end_run(state, Outcome::Won);
        return;
    }

    // Jump arc
    if state.ball.airborne {
        state.ball.vertical_vel += t.gravity;
        state.ball.pos.y += state.ball.vertical_vel;
        if state.ball.pos.y <= t.base_height {
            state.ball.land(t.base_height);
        }
    }

    // Stairs override the arc for this tick
    match find_support(state.ball.pos, &state.world) {
        Some(support) => {
            state.ball.supported = true;
            // Low stairs never pull the ball through the floor
            let y = (support.top - state.ball.radius + t.landing_offset).max(t.base_height);
            state.ball.land(y);
        }
        None => state.ball.supported = false,
    }

    // Walked off a ledge without jumping: drop fast
    if !state.ball.airborne && !state.ball.supported {
        state.ball.pos.y += t.gravity * t.fall_multiplier;
        if state.ball.pos.y <= t.base_height {
            state.ball.land(t.base_height);
        }
    }

    // Fatal checks run even when supported
    if let Some(cause) = find_fatal(state.ball.pos, state.ball.radius, &state.world) {
        log::debug!(
            "Ball lost at x={:.2} y={:.2}: {:?}",
            state.ball.pos.x,
            state.ball.pos.y,
            cause
        );
        end_run(state, Outcome::Lost(cause));
        return;
    }

    for index in star_pickups(state.ball.pos, state.ball.radius, &state.world) {
        state.world.stars[index].collected = true;
        state.run.score += t.star_value;
        log::debug!("Star {} collected, score {}", index, state.run.score);
        state.events.push(GameEvent::StarCollected {
            star: index,
            score: state.run.score,
        });
    }

    if let Some(pad) = find_pad_contact(state.ball.pos, state.ball.radius, &state.world) {
        if state.ball.double_jump(t.pad_impulse) {
            log::debug!("Pad {} bounce at x={:.2}", pad, state.ball.pos.x);
            state.events.push(GameEvent::DoubleJump { pad });
        }
    }
}

/// How a run ended
enum Outcome {
    Won,
    Lost(FatalHit),
}

/// Enter Won/Lost, raise the terminal event and report the records to persist
fn end_run(state: &mut GameState, outcome: Outcome) {
    let (phase, event) = match outcome {
        Outcome::Won => (RunPhase::Won, GameEvent::Won),
        Outcome::Lost(cause) => (RunPhase::Lost, GameEvent::Lost { cause }),
    };
    let new_high_score = state.run.finish(phase);
    state.events.push(event);
    state.events.push(GameEvent::RunEnded {
        phase,
        distance: state.run.distance,
        score: state.run.score,
        high_score: state.run.high_score,
        new_high_score,
    });
}

/// Leading x edge of every hazard the ball would hit at its current height
fn ground_hazard_edges(state: &GameState) -> impl Iterator<Item = f32> + '_ {
    let ball = &state.ball;
    let blocks = state
        .world
        .blocks()
        .filter(move |b| {
            (ball.pos.y - b.center.y).abs() < b.half_extent
                && (ball.pos.z - b.center.z).abs() < b.half_extent
        })
        .map(|b| b.center.x - b.half_extent);

    let cones = state
        .world
        .cones
        .iter()
        .filter(move |c| {
            c.orientation == ConeOrientation::Upright && c.danger_band_contains(ball.pos.y)
        })
        .filter_map(move |c| {
            let reach = ball.radius + c.base_radius;
            let dz = ball.pos.z - c.pos.z;
            let half_width_sq = reach * reach - dz * dz;
            (half_width_sq > 0.0).then(|| c.pos.x - half_width_sq.sqrt())
        });

    blocks.chain(cones)
}

/// Jump when a ground hazard is about to reach the ball
fn autopilot_wants_jump(state: &GameState) -> bool {
    let ball = &state.ball;
    if ball.airborne && !ball.supported {
        return false;
    }
    ground_hazard_edges(state).any(|edge| {
        let gap = edge - ball.pos.x;
        gap > 0.0 && gap <= AUTOPILOT_LOOKAHEAD
    })
}
