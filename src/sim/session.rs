//! One shooting-gallery match: targets, the gun and the countdown

use glam::Vec2;

use super::pool::{Arena, TargetPool};
use super::rng::SimRng;
use super::sprite::SpriteSheet;
use super::weapon::Weapon;
use crate::feedback::{Feedback, SoundEffect};
use crate::settings::Settings;

/// Match outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Playing,
    /// Every target destroyed before the timer ran out
    Won,
    /// Timer ran out
    Lost,
}

/// Owns the pool and the weapon and drives them frame by frame
#[derive(Debug, Clone)]
pub struct ShooterSession {
    settings: Settings,
    sprites: SpriteSheet,
    rng: SimRng,
    pool: TargetPool,
    weapon: Weapon,
    phase: MatchPhase,
    started_at: f32,
}

impl ShooterSession {
    /// Start a match at `now`
    pub fn new(settings: Settings, sprites: SpriteSheet, seed: u64, now: f32) -> Self {
        let mut rng = SimRng::new(seed);
        let weapon = Weapon::new(&settings, &sprites, now);

        let mut pool = TargetPool::new(Arena::from_settings(&settings, 0.0), now);
        pool.init(&settings, weapon.size(), &sprites, &mut rng, now);

        log::info!(
            "Match started: {} targets, {} s, seed {}",
            pool.len(),
            settings.time,
            seed
        );

        Self {
            settings,
            sprites,
            rng,
            pool,
            weapon,
            phase: MatchPhase::Playing,
            started_at: now,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn pool(&self) -> &TargetPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut TargetPool {
        &mut self.pool
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn weapon_mut(&mut self) -> &mut Weapon {
        &mut self.weapon
    }

    /// Whole seconds left; `Time` minus the truncated elapsed time
    pub fn remaining_time(&self, now: f32) -> i32 {
        self.settings
            .time
            .saturating_sub((now - self.started_at).floor() as i32)
    }

    pub fn bullets_count(&mut self, now: f32) -> usize {
        self.weapon.bullets_count(now)
    }

    pub fn aim_at(&mut self, point: Vec2) {
        self.weapon.aim_at(point);
    }

    pub fn fire(&mut self, now: f32, fx: &mut dyn Feedback) -> bool {
        self.phase == MatchPhase::Playing && self.weapon.fire(now, fx)
    }

    /// Player reload: top up the magazine behind the reload delay
    pub fn reload(&mut self, now: f32, fx: &mut dyn Feedback) {
        self.weapon.reload(false, now, fx);
    }

    /// Respawn the targets, rebuild the magazine and restart the timer
    pub fn restart(&mut self, now: f32, fx: &mut dyn Feedback) {
        self.pool
            .init(&self.settings, self.weapon.size(), &self.sprites, &mut self.rng, now);
        self.weapon.reload(true, now, fx);
        self.started_at = now;
        self.phase = MatchPhase::Playing;
        log::info!("Match restarted with {} targets", self.pool.len());
    }

    /// Run one frame.
    ///
    /// Outcome checks come first; otherwise targets move, projectiles
    /// advance and hit, and depleted targets are removed, in that order.
    pub fn frame(&mut self, now: f32, fx: &mut dyn Feedback) -> MatchPhase {
        if self.phase != MatchPhase::Playing {
            return self.phase;
        }

        let remaining = self.remaining_time(now);
        if self.pool.is_empty() && remaining > 0 {
            self.phase = MatchPhase::Won;
            fx.play(SoundEffect::Victory);
            log::info!("All targets destroyed with {} s left", remaining);
        } else if remaining <= 0 {
            self.pool.clear();
            self.phase = MatchPhase::Lost;
            fx.play(SoundEffect::Defeat);
            log::info!("Time is up");
        } else {
            self.pool.update(now);
            self.weapon.update(now, &mut self.pool, fx);
            self.pool.prune();
        }

        self.phase
    }
}
