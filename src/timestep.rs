//! Fixed timestep accumulator
//!
//! Converts variable frame times into a whole number of simulation ticks.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame time accepted, longer stalls are clamped
pub const MAX_FRAME_TIME: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    accumulator: f32,
    dt: f32,
    max_substeps: u32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedTimestep {
    pub fn new(dt: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            dt,
            max_substeps: max_substeps.max(1),
        }
    }

    pub fn from_hz(tick_hz: f32, max_substeps: u32) -> Self {
        Self::new(1.0 / tick_hz.max(1.0), max_substeps)
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Add elapsed frame time (seconds) and return how many ticks to run
    ///
    /// At most `max_substeps` ticks are returned per call to prevent a spiral
    /// of death; any backlog beyond that is dropped.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_TIME);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            self.accumulator -= self.dt;
            substeps += 1;
        }
        if substeps == self.max_substeps && self.accumulator >= self.dt {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator %= self.dt;
        }
        substeps
    }

    /// Fraction of a tick left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_partial_frames() {
        let mut step = FixedTimestep::new(0.01, 8);
        assert_eq!(step.advance(0.004), 0);
        assert_eq!(step.advance(0.004), 0);
        assert_eq!(step.advance(0.004), 1);
        assert!(step.alpha() > 0.1 && step.alpha() < 0.3);
    }

    #[test]
    fn test_substeps_capped() {
        let mut step = FixedTimestep::new(0.01, 4);
        assert_eq!(step.advance(0.095), 4);
        // Backlog dropped rather than replayed
        assert_eq!(step.advance(0.0), 0);
    }

    #[test]
    fn test_long_stalls_clamped() {
        let mut step = FixedTimestep::from_hz(25.0, 100);
        // 5 seconds clamps to 0.1s, two and a half ticks at 25 Hz
        assert_eq!(step.advance(5.0), 2);
        assert_eq!(step.advance(-1.0), 0);
    }
}
