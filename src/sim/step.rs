//! Fixed timestep accumulator
//!
//! Frames arrive at whatever rate the host loop manages; the simulation
//! always advances in whole `STEP_MS` steps.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, STEP_MS};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixedStep {
    accumulator: f64,
    last_time: Option<f64>,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame timestamp, returns how many steps to run.
    /// The first frame only primes the clock.
    pub fn advance(&mut self, now: f64) -> u32 {
        let Some(last) = self.last_time.replace(now) else {
            return 0;
        };
        let dt = (now - last).clamp(0.0, MAX_FRAME_MS);
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= STEP_MS && steps < MAX_SUBSTEPS {
            self.accumulator -= STEP_MS;
            steps += 1;
        }
        // Drop backlog past the substep cap
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(STEP_MS);
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_primes() {
        let mut step = FixedStep::new();
        assert_eq!(step.advance(1000.0), 0);
        assert_eq!(step.advance(1000.0 + STEP_MS), 1);
    }

    #[test]
    fn test_sixty_steps_per_second() {
        let mut step = FixedStep::new();
        step.advance(0.0);
        let mut total = 0;
        // 120 Hz frames for one second
        for i in 1..=120 {
            total += step.advance(i as f64 * 1000.0 / 120.0);
        }
        assert!((59..=60).contains(&total), "ran {total} steps");
    }

    #[test]
    fn test_long_stall_capped() {
        let mut step = FixedStep::new();
        step.advance(0.0);
        // Stalls of any length yield at most the substep cap
        for gap in [100.0, 1000.0, 1e9] {
            let mut step = FixedStep::new();
            step.advance(0.0);
            assert_eq!(step.advance(gap), MAX_SUBSTEPS);
        }

        // Backlog past the cap is dropped: only a partial step carries over
        assert_eq!(step.advance(MAX_FRAME_MS), MAX_SUBSTEPS);
        assert_eq!(step.advance(MAX_FRAME_MS + 1.0), 1);
        assert_eq!(step.advance(MAX_FRAME_MS + 2.0), 0);
    }

    #[test]
    fn test_short_frames_not_capped() {
        let mut step = FixedStep::new();
        step.advance(0.0);
        // Three steps' worth in one frame runs all three
        assert_eq!(step.advance(3.0 * STEP_MS + 0.5), 3);
    }

    #[test]
    fn test_reset_reprimes() {
        let mut step = FixedStep::new();
        step.advance(0.0);
        step.advance(50.0);
        step.reset();
        assert_eq!(step.advance(10_000.0), 0);
    }
}
