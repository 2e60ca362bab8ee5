//! Mouse Skills - timing and motion engine for mouse reaction games
//!
//! Core modules:
//! - `sim`: Deterministic simulation (timers, ball motion, game sessions)
//! - `settings`: Validated configuration for both tests
//! - `results`: Reaction statistics and trace result reports
//! - `error`: Configuration errors

pub mod error;
pub mod results;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use results::{ReactionStats, TraceReport, TraceResults};
pub use settings::{ReactionSettings, Rgb, Settings, TraceSettings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz)
    pub const STEP_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death.
    /// Below what one max-length frame yields, so long frames drop backlog.
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame gap fed into the step accumulator
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Default window size for the trace test
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 650.0;
    /// Gap kept between the ball and the edge after a resize squeezes it
    pub const RESIZE_MARGIN: f32 = 20.0;

    /// Heading hold bounds (ms)
    pub const MIN_HOLD_MS: f64 = 500.0;
    pub const MAX_HOLD_MS: f64 = 2000.0;

    /// Reaction delay bounds (ms)
    pub const MIN_DELAY_MS: f64 = 1000.0;
    pub const MAX_DELAY_MS: f64 = 6000.0;
    /// How long the "clicked too early" feedback stays visible
    pub const RESET_FEEDBACK_MS: f64 = 3000.0;

    /// Trace defaults
    pub const BALL_SPEED: u32 = 3;
    pub const MAX_BALL_SPEED: u32 = 10;
    pub const BALL_RADIUS: u32 = 40;
    pub const MAX_BALL_RADIUS: u32 = 100;
    pub const RUNTIME_SECONDS: u32 = 30;

    pub const MILLIS_PER_SECOND: f64 = 1000.0;
}

/// Format milliseconds as seconds with two decimals
#[inline]
pub fn millis_to_seconds(millis: f64) -> String {
    format!("{:.2}", millis / consts::MILLIS_PER_SECOND)
}
