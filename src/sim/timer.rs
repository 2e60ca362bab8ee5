//! Elapsed-time accumulator
//!
//! Sums wall-clock time across start/stop intervals. Timestamps are passed in
//! by the caller (ms, monotonic) so the timer stays deterministic.

use serde::{Deserialize, Serialize};

/// Accumulates milliseconds across possibly interrupted intervals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElapsedTimer {
    accumulated_ms: f64,
    /// Start of the open interval, None when stopped
    interval_start_ms: Option<f64>,
}

impl ElapsedTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an interval at `now`. An already open interval restarts.
    pub fn start(&mut self, now: f64) {
        if self.interval_start_ms.is_some() {
            log::debug!("ElapsedTimer restarted while running");
        }
        self.interval_start_ms = Some(now);
    }

    /// Fold the open interval into the total and reopen at `now`
    pub fn update_value(&mut self, now: f64) {
        if self.close(now, "update_value") {
            self.interval_start_ms = Some(now);
        }
    }

    /// Fold the open interval into the total without reopening
    pub fn stop(&mut self, now: f64) {
        self.close(now, "stop");
    }

    /// Zero the total and drop any open interval
    pub fn reset(&mut self) {
        self.accumulated_ms = 0.0;
        self.interval_start_ms = None;
    }

    /// Accumulated milliseconds (open interval not included)
    pub fn total_time(&self) -> f64 {
        self.accumulated_ms
    }

    pub fn is_running(&self) -> bool {
        self.interval_start_ms.is_some()
    }

    fn close(&mut self, now: f64, op: &str) -> bool {
        match self.interval_start_ms.take() {
            Some(start) => {
                // Clock going backwards contributes nothing
                self.accumulated_ms += (now - start).max(0.0);
                true
            }
            None => {
                log::warn!("ElapsedTimer::{op} called with no open interval, ignored");
                false
            }
        }
    }
}
