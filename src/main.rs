//! Gallery Shot entry point
//!
//! Runs a scripted match against a simulated 60 fps clock and logs the
//! outcome. Usage: `gallery-shot [settings-file] [seed]`.

use std::path::Path;

use glam::Vec2;

use gallery_shot::platform::{ElapsedTime, ManualClock};
use gallery_shot::sim::{MatchPhase, ShooterSession, SpriteSheet};
use gallery_shot::{LoggingFeedback, Settings};

const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_SEED: u64 = 0x5EED;
/// Hard stop for matches without a time limit
const MAX_FRAMES: u32 = 60 * 600;

fn main() {
    env_logger::init();
    log::info!("Gallery Shot (headless) starting...");

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "input.txt".to_string());
    let seed = match args.next() {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Seed '{}' is not a number, using {}", raw, DEFAULT_SEED);
            DEFAULT_SEED
        }),
        None => DEFAULT_SEED,
    };

    let settings = load_settings(Path::new(&path));
    let mut clock = ManualClock::default();
    let mut fx = LoggingFeedback;
    let mut session = ShooterSession::new(settings, SpriteSheet::standard(), seed, clock.elapsed());

    let width = session.settings().width as f32;
    let height = session.settings().height as f32;
    let mut frames = 0;

    while session.phase() == MatchPhase::Playing && frames < MAX_FRAMES {
        let now = clock.advance(FRAME_DT);
        frames += 1;

        // Sweep the aim back and forth across the arena
        let sweep = (now * 0.7).sin() * 0.5 + 0.5;
        session.aim_at(Vec2::new(sweep * width, height * 0.6));

        if session.weapon().ready_count() == 0 {
            session.reload(now, &mut fx);
        }
        session.fire(now, &mut fx);
        session.frame(now, &mut fx);
    }

    let now = clock.elapsed();
    match session.phase() {
        MatchPhase::Won => log::info!(
            "Won after {:.1} s with {} s to spare",
            now,
            session.remaining_time(now)
        ),
        MatchPhase::Lost => log::info!("Lost after {:.1} s", now),
        MatchPhase::Playing => log::info!(
            "Stopped after {} frames, {} targets left",
            frames,
            session.pool().len()
        ),
    }

    match serde_json::to_string(session.pool().targets()) {
        Ok(json) => log::debug!("Targets: {}", json),
        Err(e) => log::warn!("Failed to serialize targets: {}", e),
    }
}

/// Read settings, falling back to a small demo match
fn load_settings(path: &Path) -> Settings {
    let mut settings = match Settings::load(path) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("{}; using defaults", e);
            Settings::default()
        }
    };

    if settings.count_target == 0 {
        settings.count_target = 12;
        settings.bullet_count = settings.bullet_count.max(12);
        log::info!("No targets configured, running the demo match");
    }
    if settings.speed == 0 {
        settings.speed = 100;
    }
    if settings.time == 0 {
        settings.time = 60;
    }
    settings
}
