//! Deterministic simulation module
//!
//! All game logic lives here. This module must be pure and deterministic:
//! - Timestamps are passed in, never read from the system clock
//! - Seeded RNG only
//! - Fixed timestep for ball motion
//! - No rendering or platform dependencies

pub mod motion;
pub mod reaction;
pub mod step;
pub mod timer;
pub mod trace;

pub use motion::{BoundedMotionSimulator, Containment, Heading, HoldTime};
pub use reaction::{ReactionEvent, ReactionPhase, ReactionSession};
pub use step::FixedStep;
pub use timer::ElapsedTimer;
pub use trace::{TraceFrame, TraceSession, TraceUpdate};
