//! Error types for settings validation and loading.

use thiserror::Error;

/// Errors raised while validating or loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Ball speed slider only goes to the maximum speed
    #[error("Ball speed {0} out of range 0..={1}")]
    BallSpeedOutOfRange(u32, u32),

    /// Ball radius slider only goes to the maximum radius
    #[error("Ball radius {0} out of range 0..={1}")]
    BallRadiusOutOfRange(u32, u32),

    /// Runtime text was not a whole number of seconds
    #[error("Invalid runtime: {0:?}")]
    InvalidRuntime(String),

    /// Reaction delay bounds are inverted or negative
    #[error("Invalid delay range: {min}..{max} ms")]
    InvalidDelayRange { min: f64, max: f64 },

    /// Heading hold bounds are inverted or negative
    #[error("Invalid hold range: {min}..{max} ms")]
    InvalidHoldRange { min: f64, max: f64 },

    /// Settings JSON could not be parsed
    #[error("Settings JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
