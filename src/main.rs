//! Mouse Skills headless driver
//!
//! Plays both tests against a scripted player on a virtual clock and prints
//! the results as JSON.
//!
//! Usage: `mouse-skills [settings.json] [seed]`

use std::error::Error;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde_json::json;

use mouse_skills::consts::{STEP_MS, WINDOW_HEIGHT, WINDOW_WIDTH};
use mouse_skills::sim::{
    Containment, ReactionEvent, ReactionPhase, ReactionSession, TraceSession, TraceUpdate,
};
use mouse_skills::{ReactionStats, Settings, SettingsError, TraceResults};

/// Reaction turns played by the scripted player
const REACTION_TURNS: u32 = 5;
/// How far the scripted pointer can move per frame (px)
const POINTER_SPEED: f32 = 4.0;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    log::info!("Mouse Skills (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::from_json(&std::fs::read_to_string(&path)?)?,
        None => Settings::default(),
    };
    let seed: u64 = match args.next() {
        Some(s) => s.parse()?,
        None => 12345,
    };
    log::info!("Using seed {}", seed);

    let reaction = play_reaction(&settings, seed)?;
    let trace = play_trace(&settings, seed)?;

    let output = json!({
        "reaction": {
            "turns": reaction.turns,
            "averageMs": reaction.average_ms(),
            "bestMs": reaction.best_ms,
        },
        "trace": trace.to_report(),
        "traceAccuracy": format!("{:.1}%", trace.accuracy() * 100.0),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Click through a few reaction turns, including one jumped start
fn play_reaction(settings: &Settings, seed: u64) -> Result<ReactionStats, SettingsError> {
    let mut session = ReactionSession::new(settings.reaction.clone(), seed)?;
    let mut player = Pcg32::seed_from_u64(seed.wrapping_add(1));
    let mut now = 0.0;

    session.activate(now);
    for turn in 0..REACTION_TURNS {
        let can_jump = matches!(
            session.phase(),
            ReactionPhase::AwaitingGreen { green_at } if green_at > now + 200.0
        );
        if turn == 1 && can_jump {
            // Anticipate the green and get caught
            now += 200.0;
            if let ReactionEvent::EarlyClick { green_at } = session.activate(now) {
                log::info!("Jumped the start, green now at {:.0}ms", green_at);
            }
        }

        while !session.phase().is_green() {
            now += STEP_MS;
            session.tick(now);
        }
        now += player.random_range(180.0..320.0);
        if let ReactionEvent::Result { reaction_ms, .. } = session.activate(now) {
            log::info!("Turn {}: {:.0}ms", turn + 1, reaction_ms);
        }

        // Look at the result, then start the next turn
        now += 1500.0;
        session.activate(now);
    }

    Ok(session.stats().clone())
}

/// Chase the ball with a speed-limited pointer until the runtime is up
fn play_trace(settings: &Settings, seed: u64) -> Result<TraceResults, SettingsError> {
    let area = Containment::trace_area(WINDOW_WIDTH, WINDOW_HEIGHT);
    let mut session = TraceSession::new(settings.trace.clone(), area, seed, 0.0)?;
    let mut pointer = Vec2::new(area.min_x, area.min_y);
    let mut now = 0.0;

    loop {
        now += STEP_MS;
        let to_ball = session.ball_position() - pointer;
        pointer += to_ball.clamp_length_max(POINTER_SPEED);
        session.pointer_moved(pointer, now);

        if let TraceUpdate::Finished(results) = session.tick(now) {
            return Ok(results);
        }
    }
}
