//! Bounded ball motion
//!
//! The trace ball moves diagonally at a fixed speed per step, picks a new
//! random heading every 0.5-2 s, and bounces off the edges of its area.
//! Bounces also push the next random heading change back by the minimum hold
//! time so the ball does not jitter against a wall.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_HOLD_MS, MIN_HOLD_MS, RESIZE_MARGIN};

/// Per-axis direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Heading {
    /// Moving toward +x (right)
    pub positive_x: bool,
    /// Moving toward +y (down in screen space)
    pub positive_y: bool,
}

impl Heading {
    pub const fn new(positive_x: bool, positive_y: bool) -> Self {
        Self {
            positive_x,
            positive_y,
        }
    }

    /// One of the four diagonals, equally likely
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            positive_x: rng.random_bool(0.5),
            positive_y: rng.random_bool(0.5),
        }
    }

    /// Displacement for one step at `speed`
    pub fn step(&self, speed: f32) -> Vec2 {
        Vec2::new(
            if self.positive_x { speed } else { -speed },
            if self.positive_y { speed } else { -speed },
        )
    }
}

/// Rectangle the ball's edge must stay within
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Containment {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Containment {
    pub const fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Trace play area for a window: the left quarter is the settings sidebar
    pub fn trace_area(width: f32, height: f32) -> Self {
        Self::new(width / 4.0, width, 0.0, height)
    }

    pub fn centre(&self) -> Vec2 {
        Vec2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Clamp a centre point so an object of `extent` stays inside.
    /// An axis narrower than the extent pins the centre to its midpoint.
    pub fn clamp_centre(&self, pos: Vec2, extent: f32) -> Vec2 {
        let half = extent / 2.0;
        Vec2::new(
            clamp_axis(pos.x, self.min_x + half, self.max_x - half),
            clamp_axis(pos.y, self.min_y + half, self.max_y - half),
        )
    }
}

fn clamp_axis(v: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi { (lo + hi) / 2.0 } else { v.clamp(lo, hi) }
}

/// Range a random heading is held for (ms)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldTime {
    pub min_ms: f64,
    pub max_ms: f64,
}

impl Default for HoldTime {
    fn default() -> Self {
        Self {
            min_ms: MIN_HOLD_MS,
            max_ms: MAX_HOLD_MS,
        }
    }
}

impl HoldTime {
    pub const fn new(min_ms: f64, max_ms: f64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Uniform in [min, max)
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        if self.max_ms <= self.min_ms {
            return self.min_ms;
        }
        rng.random_range(self.min_ms..self.max_ms)
    }
}

/// Moving object confined to a rectangle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundedMotionSimulator {
    position: Vec2,
    heading: Heading,
    /// Distance per step along each axis
    speed: f32,
    /// Object diameter
    extent: f32,
    containment: Containment,
    /// None until the first tick schedules a heading change
    next_heading_change_at: Option<f64>,
    hold: HoldTime,
}

impl BoundedMotionSimulator {
    /// Create a simulator with the object at the centre of `containment`
    pub fn new(containment: Containment, speed: f32, extent: f32, hold: HoldTime) -> Self {
        let mut sim = Self {
            position: Vec2::ZERO,
            heading: Heading::default(),
            speed: speed.max(0.0),
            extent: extent.max(0.0),
            containment,
            next_heading_change_at: None,
            hold,
        };
        sim.place_at_centre();
        sim
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn extent(&self) -> f32 {
        self.extent
    }

    pub fn containment(&self) -> Containment {
        self.containment
    }

    pub fn next_heading_change_at(&self) -> Option<f64> {
        self.next_heading_change_at
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    /// Change the object size, keeping it inside the containment
    pub fn set_extent(&mut self, extent: f32) {
        self.extent = extent.max(0.0);
        self.position = self.containment.clamp_centre(self.position, self.extent);
    }

    pub fn set_hold(&mut self, hold: HoldTime) {
        self.hold = hold;
    }

    /// Force a heading and hold it until `hold_until`
    pub fn set_heading(&mut self, heading: Heading, hold_until: f64) {
        self.heading = heading;
        self.next_heading_change_at = Some(hold_until);
    }

    /// Move the object, clamped into the containment
    pub fn set_position(&mut self, pos: Vec2) {
        self.position = self.containment.clamp_centre(pos, self.extent);
    }

    pub fn place_at_centre(&mut self) {
        self.position = self.containment.clamp_centre(self.containment.centre(), self.extent);
    }

    /// Adopt a new containment (window resize). An object touching or past
    /// an edge is pulled back inside with a small margin.
    pub fn resize(&mut self, containment: Containment) {
        self.containment = containment;
        let half = self.extent / 2.0;
        let c = containment;
        let mut pos = self.position;

        if pos.y + half >= c.max_y {
            pos.y = c.max_y - half - RESIZE_MARGIN;
        }
        if pos.y - half <= c.min_y {
            pos.y = c.min_y + half + RESIZE_MARGIN;
        }
        if pos.x + half >= c.max_x {
            pos.x = c.max_x - half - RESIZE_MARGIN;
        }
        if pos.x - half <= c.min_x {
            pos.x = c.min_x + half + RESIZE_MARGIN;
        }

        self.position = c.clamp_centre(pos, self.extent);
        log::debug!("Containment resized to {:?}, ball at {}", c, self.position);
    }

    /// Circular hit test against the object
    pub fn is_pointer_inside(&self, point: Vec2) -> bool {
        point.distance(self.position) <= self.extent / 2.0
    }

    /// Advance one fixed step
    pub fn tick<R: Rng>(&mut self, now: f64, rng: &mut R) {
        // Scheduled random heading change
        let due = self.next_heading_change_at.is_none_or(|at| now >= at);
        if due {
            self.heading = Heading::random(rng);
            self.next_heading_change_at = Some(now + self.hold.sample(rng));
            log::debug!("Heading changed to {:?} at {:.0}ms", self.heading, now);
        }

        // Bounce before moving so the step never leaves the area
        let half = self.extent / 2.0;
        let c = self.containment;
        let extend_x = bounce_axis(
            self.position.x,
            &mut self.heading.positive_x,
            self.speed,
            c.min_x + half,
            c.max_x - half,
        );
        let extend_y = bounce_axis(
            self.position.y,
            &mut self.heading.positive_y,
            self.speed,
            c.min_y + half,
            c.max_y - half,
        );
        let bounces = extend_x as u32 + extend_y as u32;
        if let Some(at) = self.next_heading_change_at.as_mut() {
            *at += self.hold.min_ms * bounces as f64;
        }

        let next = self.position + self.heading.step(self.speed);
        self.position = c.clamp_centre(next, self.extent);
    }
}

/// Point the axis away from an edge the next step would cross.
/// `lo..=hi` is the valid centre range; no bounce when it is empty.
/// Returns whether the bounce should extend the heading hold, which only
/// happens when the range fits at least one full step.
fn bounce_axis(pos: f32, positive: &mut bool, speed: f32, lo: f32, hi: f32) -> bool {
    if lo > hi {
        return false;
    }
    let flipped = if *positive && pos + speed > hi {
        *positive = false;
        true
    } else if !*positive && pos - speed < lo {
        *positive = true;
        true
    } else {
        false
    };
    // Narrower ranges bounce every step
    flipped && hi - lo >= speed
}
