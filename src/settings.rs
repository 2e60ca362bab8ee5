//! Game settings
//!
//! Values arrive from the settings panel of each test. The panel restricts
//! what can be typed; `validate` is the last line before the engine.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// An opaque display colour handed back to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 128, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Trace test settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceSettings {
    /// Distance moved per step along each axis (0-10)
    pub ball_speed: u32,
    /// Ball radius in pixels (0-100)
    pub ball_radius: u32,
    /// Session length in whole seconds
    pub runtime_seconds: u32,
    /// Ball colour while the pointer is on it
    pub on_ball_colour: Rgb,
    /// Ball colour while the pointer is off it
    pub off_ball_colour: Rgb,
    /// Shortest time a random heading is held (ms)
    pub min_hold_ms: f64,
    /// Longest time a random heading is held (ms)
    pub max_hold_ms: f64,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            ball_speed: BALL_SPEED,
            ball_radius: BALL_RADIUS,
            runtime_seconds: RUNTIME_SECONDS,
            on_ball_colour: Rgb::GREEN,
            off_ball_colour: Rgb::RED,
            min_hold_ms: MIN_HOLD_MS,
            max_hold_ms: MAX_HOLD_MS,
        }
    }
}

impl TraceSettings {
    /// Session length in milliseconds
    pub fn runtime_ms(&self) -> f64 {
        self.runtime_seconds as f64 * MILLIS_PER_SECOND
    }

    /// Ball diameter, the extent used for edge collision
    pub fn ball_extent(&self) -> f32 {
        self.ball_radius as f32 * 2.0
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.ball_speed > MAX_BALL_SPEED {
            return Err(SettingsError::BallSpeedOutOfRange(
                self.ball_speed,
                MAX_BALL_SPEED,
            ));
        }
        if self.ball_radius > MAX_BALL_RADIUS {
            return Err(SettingsError::BallRadiusOutOfRange(
                self.ball_radius,
                MAX_BALL_RADIUS,
            ));
        }
        if !(self.min_hold_ms >= 0.0 && self.min_hold_ms <= self.max_hold_ms) {
            return Err(SettingsError::InvalidHoldRange {
                min: self.min_hold_ms,
                max: self.max_hold_ms,
            });
        }
        Ok(())
    }
}

/// Reaction test settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionSettings {
    /// Shortest wait before the screen turns green (ms)
    pub min_delay_ms: f64,
    /// Longest wait before the screen turns green (ms)
    pub max_delay_ms: f64,
}

impl Default for ReactionSettings {
    fn default() -> Self {
        Self {
            min_delay_ms: MIN_DELAY_MS,
            max_delay_ms: MAX_DELAY_MS,
        }
    }
}

impl ReactionSettings {
    /// Fixed delay, useful for practice runs
    pub fn fixed(delay_ms: f64) -> Self {
        Self {
            min_delay_ms: delay_ms,
            max_delay_ms: delay_ms,
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.min_delay_ms >= 0.0 && self.min_delay_ms <= self.max_delay_ms) {
            return Err(SettingsError::InvalidDelayRange {
                min: self.min_delay_ms,
                max: self.max_delay_ms,
            });
        }
        Ok(())
    }
}

/// All settings for the suite
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub trace: TraceSettings,
    pub reaction: ReactionSettings,
}

impl Settings {
    /// Parse and validate settings from JSON. Missing fields use defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.trace.validate()?;
        self.reaction.validate()
    }
}

/// Parse the runtime text field. Only digits are accepted.
pub fn parse_runtime_seconds(text: &str) -> Result<u32, SettingsError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SettingsError::InvalidRuntime(text.to_string()));
    }
    text.parse()
        .map_err(|_| SettingsError::InvalidRuntime(text.to_string()))
}
