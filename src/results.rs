//! Session results
//!
//! Running reaction statistics and the trace test report shown on the
//! results screen.

use serde::{Deserialize, Serialize};

use crate::millis_to_seconds;

/// Running reaction-time statistics for one reaction session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReactionStats {
    /// Sum of all recorded reaction times (whole ms)
    pub total_ms: u64,
    /// Number of recorded turns
    pub turns: u32,
    /// Fastest reaction so far (ms)
    pub best_ms: Option<u64>,
}

impl ReactionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reaction. Fractions of a millisecond are dropped.
    pub fn record(&mut self, reaction_ms: f64) -> u64 {
        let ms = reaction_ms.max(0.0) as u64;
        self.total_ms += ms;
        self.turns += 1;
        self.best_ms = Some(self.best_ms.map_or(ms, |best| best.min(ms)));
        ms
    }

    /// Average reaction (integer ms), None before the first turn
    pub fn average_ms(&self) -> Option<u64> {
        if self.turns == 0 {
            return None;
        }
        Some(self.total_ms / self.turns as u64)
    }
}

/// Numeric outcome of a finished trace session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceResults {
    pub time_on_ball_ms: f64,
    pub runtime_ms: f64,
    pub ball_speed: u32,
    pub ball_radius: u32,
}

impl TraceResults {
    /// Fraction of the runtime spent on the ball (0-1)
    pub fn accuracy(&self) -> f64 {
        if self.runtime_ms <= 0.0 {
            return 0.0;
        }
        (self.time_on_ball_ms / self.runtime_ms).clamp(0.0, 1.0)
    }

    /// Format for the results screen
    pub fn to_report(&self) -> TraceReport {
        TraceReport {
            time_on_ball_seconds: millis_to_seconds(self.time_on_ball_ms),
            total_runtime_seconds: millis_to_seconds(self.runtime_ms),
            ball_speed: self.ball_speed.to_string(),
            ball_radius: self.ball_radius.to_string(),
        }
    }
}

/// Display strings handed to the results screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceReport {
    pub time_on_ball_seconds: String,
    pub total_runtime_seconds: String,
    pub ball_speed: String,
    pub ball_radius: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_average() {
        let mut stats = ReactionStats::new();
        assert_eq!(stats.average_ms(), None);

        stats.record(250.7);
        stats.record(199.2);
        stats.record(300.0);
        assert_eq!(stats.turns, 3);
        assert_eq!(stats.total_ms, 250 + 199 + 300);
        assert_eq!(stats.average_ms(), Some(249));
        assert_eq!(stats.best_ms, Some(199));
    }

    #[test]
    fn test_trace_report_formatting() {
        let results = TraceResults {
            time_on_ball_ms: 12345.6,
            runtime_ms: 30000.0,
            ball_speed: 3,
            ball_radius: 40,
        };
        let report = results.to_report();
        assert_eq!(report.time_on_ball_seconds, "12.35");
        assert_eq!(report.total_runtime_seconds, "30.00");
        assert_eq!(report.ball_speed, "3");
        assert_eq!(report.ball_radius, "40");

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"timeOnBallSeconds\":\"12.35\""));
        assert!(json.contains("\"totalRuntimeSeconds\":\"30.00\""));
    }

    #[test]
    fn test_accuracy_bounds() {
        let mut results = TraceResults {
            time_on_ball_ms: 15000.0,
            runtime_ms: 30000.0,
            ball_speed: 3,
            ball_radius: 40,
        };
        assert!((results.accuracy() - 0.5).abs() < 1e-9);
        results.runtime_ms = 0.0;
        assert_eq!(results.accuracy(), 0.0);
    }
}
