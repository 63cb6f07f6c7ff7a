//! Deterministic time system
//!
//! Fixed 60Hz tick rate. Frame deltas are converted into whole physics
//! sub-steps; rendering runs once per frame regardless.

use std::time::Duration;

/// Fixed simulation tick rate (60 Hz = 16.666ms per tick)
pub const TICK_RATE_HZ: u32 = 60;
pub const TICK_SECONDS: f32 = 1.0 / TICK_RATE_HZ as f32;

/// Upper bound on sub-steps taken for a single frame.
pub const MAX_SUBSTEPS: u32 = 3;

/// Seconds to `Duration`, treating negative or non-finite input as zero.
pub fn seconds(value: f32) -> Duration {
    if value.is_finite() && value > 0.0 {
        Duration::from_secs_f32(value)
    } else {
        Duration::ZERO
    }
}

/// Accumulator turning variable frame deltas into fixed sub-steps.
///
/// Backlog beyond `max_substeps` is dropped rather than carried, so one
/// long frame cannot trigger a burst of catch-up steps later.
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Feed a frame delta, returning how many sub-steps to run now.
    pub fn accumulate(&mut self, frame_delta: f32) -> u32 {
        if !(frame_delta.is_finite() && frame_delta > 0.0) {
            return 0;
        }
        self.accumulator += frame_delta;

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        self.accumulator %= self.step;
        substeps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(TICK_SECONDS, MAX_SUBSTEPS)
    }
}
