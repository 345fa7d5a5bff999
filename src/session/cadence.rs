//! Fixed-step accumulator
//!
//! Converts variable frame times into a whole number of fixed simulation
//! ticks, capping both the frame delta and the substeps per frame so a stall
//! can't snowball.

use crate::consts::{MAX_FRAME_DELTA, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f32,
    max_delta: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_FRAME_DELTA, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(step: f32, max_delta: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_delta,
            max_substeps,
            accumulator: 0.0,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add elapsed wall time (seconds); returns the number of ticks to run
    pub fn accumulate(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.clamp(0.0, self.max_delta);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }
        // Whatever the substep cap left behind is dropped, not carried
        if ticks == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        ticks
    }

    /// Drop any partial tick
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
