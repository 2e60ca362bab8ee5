//! Trace test session
//!
//! A ball wanders around the play area and the player keeps the pointer on
//! it. Two timers run: total runtime and time on the ball. When the runtime
//! is used up the session finishes and reports once.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::motion::{BoundedMotionSimulator, Containment, HoldTime};
use super::step::FixedStep;
use super::timer::ElapsedTimer;
use crate::error::SettingsError;
use crate::results::TraceResults;
use crate::settings::{Rgb, TraceSettings};

/// Display state for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TraceFrame {
    pub position: Vec2,
    pub radius: f32,
    pub pointer_inside: bool,
    pub time_on_ball_ms: f64,
    pub time_left_ms: f64,
    pub ball_colour: Rgb,
}

/// Outcome of a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceUpdate {
    /// Session still running
    Running(TraceFrame),
    /// Runtime used up on this tick
    Finished(TraceResults),
    /// Already finished, nothing to do until reset
    Stopped,
}

/// One trace test screen
#[derive(Debug, Clone)]
pub struct TraceSession {
    settings: TraceSettings,
    motion: BoundedMotionSimulator,
    runtime_timer: ElapsedTimer,
    hover_timer: ElapsedTimer,
    step: FixedStep,
    /// Last known pointer position, None when outside the window
    pointer: Option<Vec2>,
    pointer_inside: bool,
    finished: bool,
    rng: Pcg32,
}

impl TraceSession {
    /// Start a session at `now` with the ball in the centre of `area`.
    /// Settings are validated first.
    pub fn new(
        settings: TraceSettings,
        area: Containment,
        seed: u64,
        now: f64,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        let motion = BoundedMotionSimulator::new(
            area,
            settings.ball_speed as f32,
            settings.ball_extent(),
            HoldTime::new(settings.min_hold_ms, settings.max_hold_ms),
        );
        let mut session = Self {
            settings,
            motion,
            runtime_timer: ElapsedTimer::new(),
            hover_timer: ElapsedTimer::new(),
            step: FixedStep::new(),
            pointer: None,
            pointer_inside: false,
            finished: false,
            rng: Pcg32::seed_from_u64(seed),
        };
        session.runtime_timer.start(now);
        session.step.advance(now);
        log::info!(
            "Trace session started: {}s, speed {}, radius {}",
            session.settings.runtime_seconds,
            session.settings.ball_speed,
            session.settings.ball_radius
        );
        Ok(session)
    }

    pub fn settings(&self) -> &TraceSettings {
        &self.settings
    }

    pub fn motion(&self) -> &BoundedMotionSimulator {
        &self.motion
    }

    pub fn ball_position(&self) -> Vec2 {
        self.motion.position()
    }

    pub fn pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn time_on_ball_ms(&self) -> f64 {
        self.hover_timer.total_time()
    }

    pub fn time_left_ms(&self) -> f64 {
        (self.settings.runtime_ms() - self.runtime_timer.total_time()).max(0.0)
    }

    /// Pointer moved within the window
    pub fn pointer_moved(&mut self, point: Vec2, now: f64) {
        self.pointer = Some(point);
        self.refresh_hover(now);
    }

    /// Pointer left the window
    pub fn pointer_left(&mut self, now: f64) {
        self.pointer = None;
        self.refresh_hover(now);
    }

    /// Advance one frame
    pub fn tick(&mut self, now: f64) -> TraceUpdate {
        if self.finished {
            return TraceUpdate::Stopped;
        }

        self.runtime_timer.update_value(now);
        if self.runtime_timer.total_time() >= self.settings.runtime_ms() {
            return TraceUpdate::Finished(self.finish(now));
        }

        if self.pointer_inside {
            self.hover_timer.update_value(now);
        }

        for _ in 0..self.step.advance(now) {
            self.motion.tick(now, &mut self.rng);
        }

        // The ball may have moved onto or off a still pointer
        self.refresh_hover(now);

        TraceUpdate::Running(self.frame())
    }

    /// Current display state
    pub fn frame(&self) -> TraceFrame {
        TraceFrame {
            position: self.motion.position(),
            radius: self.motion.extent() / 2.0,
            pointer_inside: self.pointer_inside,
            time_on_ball_ms: self.time_on_ball_ms(),
            time_left_ms: self.time_left_ms(),
            ball_colour: if self.pointer_inside {
                self.settings.on_ball_colour
            } else {
                self.settings.off_ball_colour
            },
        }
    }

    /// Validate and adopt new settings, then restart the session
    pub fn apply_settings(&mut self, settings: TraceSettings, now: f64) -> Result<(), SettingsError> {
        settings.validate()?;
        self.motion.set_speed(settings.ball_speed as f32);
        self.motion.set_extent(settings.ball_extent());
        self.motion
            .set_hold(HoldTime::new(settings.min_hold_ms, settings.max_hold_ms));
        self.settings = settings;
        log::info!("Applied trace settings: {:?}", self.settings);
        self.reset(now);
        Ok(())
    }

    /// Zero both timers and restart the runtime. Settings are kept.
    pub fn reset(&mut self, now: f64) {
        self.runtime_timer.reset();
        self.hover_timer.reset();
        self.runtime_timer.start(now);

        self.pointer_inside = self.pointer_over_ball();
        if self.pointer_inside {
            self.hover_timer.start(now);
        }

        self.step.reset();
        self.step.advance(now);
        self.finished = false;
        log::debug!("Trace session reset at {:.0}ms", now);
    }

    /// Window resized
    pub fn resize_window(&mut self, width: f32, height: f32) {
        self.resize(Containment::trace_area(width, height));
    }

    pub fn resize(&mut self, area: Containment) {
        self.motion.resize(area);
    }

    fn pointer_over_ball(&self) -> bool {
        self.pointer
            .is_some_and(|p| self.motion.is_pointer_inside(p))
    }

    fn refresh_hover(&mut self, now: f64) {
        if self.finished {
            return;
        }
        let inside = self.pointer_over_ball();
        if inside == self.pointer_inside {
            return;
        }
        if inside {
            self.hover_timer.start(now);
        } else {
            self.hover_timer.stop(now);
        }
        self.pointer_inside = inside;
        log::debug!("Pointer {} ball at {:.0}ms", if inside { "on" } else { "off" }, now);
    }

    fn finish(&mut self, now: f64) -> TraceResults {
        if self.hover_timer.is_running() {
            self.hover_timer.stop(now);
        }
        self.finished = true;

        let results = TraceResults {
            time_on_ball_ms: self.hover_timer.total_time(),
            runtime_ms: self.settings.runtime_ms(),
            ball_speed: self.settings.ball_speed,
            ball_radius: self.settings.ball_radius,
        };
        log::info!(
            "Trace session finished: {:.2}s on ball of {:.2}s",
            results.time_on_ball_ms / 1000.0,
            results.runtime_ms / 1000.0
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};

    const FRAME_MS: f64 = 16.0;

    fn settings(runtime_seconds: u32) -> TraceSettings {
        TraceSettings {
            runtime_seconds,
            ..Default::default()
        }
    }

    fn area() -> Containment {
        Containment::trace_area(WINDOW_WIDTH, WINDOW_HEIGHT)
    }

    #[test]
    fn test_pointer_on_ball_whole_run() {
        let mut session = TraceSession::new(settings(5), area(), 11, 0.0).unwrap();
        session.pointer_moved(session.ball_position(), 0.0);
        assert!(session.pointer_inside());

        let mut now = 0.0;
        let mut finished = Vec::new();
        while now < 6000.0 {
            now += FRAME_MS;
            session.pointer_moved(session.ball_position(), now);
            match session.tick(now) {
                TraceUpdate::Running(frame) => {
                    assert!(frame.pointer_inside);
                    assert_eq!(frame.ball_colour, Rgb::GREEN);
                }
                TraceUpdate::Finished(results) => finished.push(results),
                TraceUpdate::Stopped => {}
            }
        }

        assert_eq!(finished.len(), 1);
        let results = finished[0];
        assert_eq!(results.runtime_ms, 5000.0);
        assert!(
            (results.time_on_ball_ms - 5000.0).abs() <= FRAME_MS,
            "time on ball {}",
            results.time_on_ball_ms
        );
        assert!(session.is_finished());
    }

    #[test]
    fn test_pointer_away_scores_nothing() {
        let mut session = TraceSession::new(settings(1), area(), 3, 0.0).unwrap();
        session.pointer_left(0.0);

        let mut now = 0.0;
        let results = loop {
            now += FRAME_MS;
            if let TraceUpdate::Finished(results) = session.tick(now) {
                break results;
            }
        };
        assert_eq!(results.time_on_ball_ms, 0.0);
        assert_eq!(results.to_report().time_on_ball_seconds, "0.00");
    }

    #[test]
    fn test_hover_edges() {
        let mut session = TraceSession::new(settings(30), area(), 5, 0.0).unwrap();
        let centre = session.ball_position();

        session.pointer_moved(Vec2::ZERO, 0.0);
        assert!(!session.pointer_inside());

        session.pointer_moved(centre, 100.0);
        assert!(session.pointer_inside());
        session.pointer_moved(centre + Vec2::new(5.0, 0.0), 150.0);
        session.pointer_left(400.0);
        assert!(!session.pointer_inside());
        assert_eq!(session.time_on_ball_ms(), 300.0);

        // Leaving again does not count anything more
        session.pointer_left(900.0);
        assert_eq!(session.time_on_ball_ms(), 300.0);
    }

    #[test]
    fn test_time_left_counts_down() {
        let mut session = TraceSession::new(settings(2), area(), 5, 1000.0).unwrap();
        match session.tick(1500.0) {
            TraceUpdate::Running(frame) => assert_eq!(frame.time_left_ms, 1500.0),
            other => panic!("expected running, got {other:?}"),
        }
    }

    #[test]
    fn test_reset_while_hovering() {
        let mut session = TraceSession::new(settings(30), area(), 8, 0.0).unwrap();
        let mut now = 0.0;
        session.pointer_moved(session.ball_position(), now);
        for _ in 0..50 {
            now += FRAME_MS;
            session.pointer_moved(session.ball_position(), now);
            session.tick(now);
        }
        assert!(session.time_on_ball_ms() > 700.0);

        session.reset(now);
        assert_eq!(session.time_on_ball_ms(), 0.0);
        assert_eq!(session.time_left_ms(), 30000.0);

        now += FRAME_MS;
        session.tick(now);
        assert!(session.time_on_ball_ms() <= FRAME_MS);
    }

    #[test]
    fn test_apply_settings_restarts() {
        let mut session = TraceSession::new(settings(1), area(), 2, 0.0).unwrap();
        let mut now = 0.0;
        while !matches!(session.tick(now), TraceUpdate::Finished(_)) {
            now += FRAME_MS;
        }
        assert_eq!(session.tick(now + FRAME_MS), TraceUpdate::Stopped);

        let new_settings = TraceSettings {
            ball_speed: 8,
            ball_radius: 20,
            runtime_seconds: 10,
            ..Default::default()
        };
        session.apply_settings(new_settings, now).unwrap();
        assert!(!session.is_finished());
        assert_eq!(session.motion().speed(), 8.0);
        assert_eq!(session.motion().extent(), 40.0);
        assert_eq!(session.time_left_ms(), 10000.0);
        assert!(matches!(
            session.tick(now + FRAME_MS),
            TraceUpdate::Running(_)
        ));
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let bad = TraceSettings {
            ball_radius: 150,
            ..Default::default()
        };
        assert!(matches!(
            TraceSession::new(bad, area(), 1, 0.0),
            Err(SettingsError::BallRadiusOutOfRange(150, 100))
        ));

        let bad = TraceSettings {
            min_hold_ms: 2500.0,
            max_hold_ms: 500.0,
            ..Default::default()
        };
        assert!(matches!(
            TraceSession::new(bad, area(), 1, 0.0),
            Err(SettingsError::InvalidHoldRange { .. })
        ));
    }

    #[test]
    fn test_apply_invalid_settings_rejected() {
        let mut session = TraceSession::new(settings(5), area(), 2, 0.0).unwrap();
        let bad = TraceSettings {
            ball_speed: 42,
            ..Default::default()
        };
        assert!(session.apply_settings(bad, 10.0).is_err());
        assert_eq!(session.settings().ball_speed, 3);
    }

    #[test]
    fn test_ball_stays_in_play_area() {
        let mut session = TraceSession::new(
            TraceSettings {
                ball_speed: 10,
                ..settings(60)
            },
            area(),
            77,
            0.0,
        )
        .unwrap();
        let a = area();
        let mut now = 0.0;
        for _ in 0..3000 {
            now += FRAME_MS;
            let TraceUpdate::Running(frame) = session.tick(now) else {
                panic!("session ended early");
            };
            assert!(frame.position.x - frame.radius >= a.min_x - 1e-3);
            assert!(frame.position.x + frame.radius <= a.max_x + 1e-3);
            assert!(frame.position.y - frame.radius >= a.min_y - 1e-3);
            assert!(frame.position.y + frame.radius <= a.max_y + 1e-3);
        }
    }

    #[test]
    fn test_resize_window_keeps_ball_visible() {
        let mut session = TraceSession::new(settings(30), area(), 4, 0.0).unwrap();
        session.resize_window(400.0, 300.0);
        let pos = session.ball_position();
        let r = session.frame().radius;
        assert!(pos.x - r >= 100.0 && pos.x + r <= 400.0);
        assert!(pos.y - r >= 0.0 && pos.y + r <= 300.0);
    }
}
