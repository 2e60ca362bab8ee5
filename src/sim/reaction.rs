//! Reaction test session
//!
//! The screen starts red; after a random delay it turns green and the player
//! clicks as fast as possible. Clicking while still red restarts the delay so
//! the green moment cannot be anticipated.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::timer::ElapsedTimer;
use crate::consts::RESET_FEEDBACK_MS;
use crate::error::SettingsError;
use crate::results::ReactionStats;
use crate::settings::ReactionSettings;

/// Current phase of the reaction test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReactionPhase {
    /// "Click to start" screen
    Intro,
    /// Red screen, turns green at `green_at`
    AwaitingGreen { green_at: f64 },
    /// Green screen, timer running since `green_at`
    Measuring { green_at: f64 },
    /// Showing the last reaction time
    ResultReady,
}

impl ReactionPhase {
    pub fn is_green(&self) -> bool {
        matches!(self, ReactionPhase::Measuring { .. })
    }
}

/// What the presentation layer should show after an input or tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReactionEvent {
    /// Red screen shown, waiting for green
    Waiting { green_at: f64 },
    /// Clicked while red; delay restarted
    EarlyClick { green_at: f64 },
    /// Screen turned green
    WentGreen,
    /// Click measured
    Result { reaction_ms: f64, average_ms: u64 },
}

/// One reaction test screen
#[derive(Debug, Clone)]
pub struct ReactionSession {
    settings: ReactionSettings,
    phase: ReactionPhase,
    timer: ElapsedTimer,
    stats: ReactionStats,
    last_reaction_ms: Option<f64>,
    early_click_at: Option<f64>,
    rng: Pcg32,
}

impl ReactionSession {
    /// Create a session in the intro phase. Settings are validated first.
    pub fn new(settings: ReactionSettings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            settings,
            phase: ReactionPhase::Intro,
            timer: ElapsedTimer::new(),
            stats: ReactionStats::new(),
            last_reaction_ms: None,
            early_click_at: None,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    pub fn phase(&self) -> ReactionPhase {
        self.phase
    }

    pub fn stats(&self) -> &ReactionStats {
        &self.stats
    }

    pub fn last_reaction_ms(&self) -> Option<f64> {
        self.last_reaction_ms
    }

    pub fn timer(&self) -> &ElapsedTimer {
        &self.timer
    }

    /// Whether the "clicked too early" message is still visible
    pub fn show_reset_feedback(&self, now: f64) -> bool {
        self.early_click_at
            .is_some_and(|at| now >= at && now - at < RESET_FEEDBACK_MS)
    }

    /// Handle a click
    pub fn activate(&mut self, now: f64) -> ReactionEvent {
        // A delay that elapsed since the last tick turns green first
        self.tick(now);

        match self.phase {
            ReactionPhase::Intro | ReactionPhase::ResultReady => {
                let green_at = self.schedule_green(now);
                ReactionEvent::Waiting { green_at }
            }
            ReactionPhase::AwaitingGreen { .. } => {
                self.early_click_at = Some(now);
                let green_at = self.schedule_green(now);
                log::debug!("Clicked too early at {:.0}ms, delay restarted", now);
                ReactionEvent::EarlyClick { green_at }
            }
            ReactionPhase::Measuring { .. } => {
                self.timer.update_value(now);
                self.timer.stop(now);
                let reaction_ms = self.timer.total_time();
                self.stats.record(reaction_ms);
                self.last_reaction_ms = Some(reaction_ms);
                self.phase = ReactionPhase::ResultReady;

                let average_ms = self.stats.average_ms().unwrap_or(reaction_ms as u64);
                log::info!(
                    "Reaction time: {:.0}ms (average {}ms over {} turns)",
                    reaction_ms,
                    average_ms,
                    self.stats.turns
                );
                ReactionEvent::Result {
                    reaction_ms,
                    average_ms,
                }
            }
        }
    }

    /// Turn green once the scheduled delay has elapsed
    pub fn tick(&mut self, now: f64) -> Option<ReactionEvent> {
        let ReactionPhase::AwaitingGreen { green_at } = self.phase else {
            return None;
        };
        if now < green_at {
            return None;
        }

        // Measure from the scheduled moment, not the frame that noticed it
        self.timer.reset();
        self.timer.start(green_at);
        self.early_click_at = None;
        self.phase = ReactionPhase::Measuring { green_at };
        log::debug!("Screen green at {:.0}ms", green_at);
        Some(ReactionEvent::WentGreen)
    }

    fn schedule_green(&mut self, now: f64) -> f64 {
        let (min, max) = (self.settings.min_delay_ms, self.settings.max_delay_ms);
        let delay = if max <= min {
            min
        } else {
            self.rng.random_range(min..=max)
        };
        let green_at = now + delay;
        self.phase = ReactionPhase::AwaitingGreen { green_at };
        log::debug!("Waiting {:.0}ms for green", delay);
        green_at
    }
}
