//! The player's gun: magazine, fire rate, reload and projectiles in flight

use glam::Vec2;

use super::ballistics::BallisticCoefficients;
use super::clock::FrameClock;
use super::pool::TargetPool;
use super::projectile::{Projectile, ProjectileKind};
use super::sprite::{SpriteSheet, SpriteSize, keys};
use crate::consts::{ANGLE_CORRECTION, FIRE_COOLDOWN, PROJECTILE_TIME_SCALE, RELOAD_DURATION};
use crate::feedback::{Feedback, SoundEffect, VisualEffect};
use crate::settings::Settings;
use crate::vector_angle;

/// Reload state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeaponPhase {
    /// Can fire when the cooldown allows
    Ready,
    /// Magazine refilled at `since`; reads empty until the delay passes
    Reloading { since: f32 },
}

/// Gun state and projectile pools
#[derive(Debug, Clone)]
pub struct Weapon {
    /// Magazine, fired last-in first-out
    ready: Vec<Projectile>,
    in_flight: Vec<Projectile>,
    magazine_size: usize,
    kind: ProjectileKind,
    muzzle_speed: f32,
    bullet_sprite: SpriteSize,
    ballistics: Option<BallisticCoefficients>,

    /// Gun sprite size
    width: u32,
    height: u32,
    win_width: f32,
    /// Gun pivot on the x axis
    gun_x: f32,

    aim: Vec2,
    /// Current rotation in degrees, texture correction applied
    rotate_angle: f32,
    /// Aimed to the left; the gun is drawn mirrored
    invert: bool,

    last_shot: Option<f32>,
    phase: WeaponPhase,
    clock: FrameClock,
    next_id: u32,
}

impl Weapon {
    /// Create a gun with a full magazine
    pub fn new(settings: &Settings, sprites: &SpriteSheet, now: f32) -> Self {
        let kind = ProjectileKind::Pistol;
        let gun = sprites.size_of(keys::GUN);

        let mut weapon = Self {
            ready: Vec::new(),
            in_flight: Vec::new(),
            magazine_size: settings.bullet_count.max(0) as usize,
            kind,
            muzzle_speed: settings.speed as f32,
            bullet_sprite: sprites.size_of(kind.profile().sprite_key),
            ballistics: None,
            width: gun.width,
            height: gun.height,
            win_width: settings.width as f32,
            gun_x: (settings.width / 2) as f32,
            aim: Vec2::ZERO,
            rotate_angle: 0.0,
            invert: false,
            last_shot: None,
            phase: WeaponPhase::Ready,
            clock: FrameClock::new(PROJECTILE_TIME_SCALE, now),
            next_id: 1,
        };
        weapon.refill();

        log::info!(
            "Weapon ready: {} rounds, muzzle speed {}",
            weapon.magazine_size,
            weapon.muzzle_speed
        );
        weapon
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Gun sprite size as a vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn magazine_size(&self) -> usize {
        self.magazine_size
    }

    /// Rounds in the magazine regardless of the reload delay
    pub fn ready_count(&self) -> usize {
        self.ready.len()
    }

    pub fn in_flight(&self) -> &[Projectile] {
        &self.in_flight
    }

    pub fn aim(&self) -> Vec2 {
        self.aim
    }

    pub fn rotate_angle(&self) -> f32 {
        self.rotate_angle
    }

    pub fn is_inverted(&self) -> bool {
        self.invert
    }

    /// Override drag/lift for every current and future projectile
    pub fn set_ballistics(&mut self, coeffs: BallisticCoefficients) {
        self.ballistics = Some(coeffs);
        for p in self.ready.iter_mut().chain(self.in_flight.iter_mut()) {
            p.set_coefficients(coeffs);
        }
    }

    /// Point the gun at `point`.
    ///
    /// Past 90° the gun flips to face left and the angle is measured from
    /// the mirrored side; the texture inclination is then subtracted.
    pub fn aim_at(&mut self, point: Vec2) {
        self.aim = point;

        let sight = Vec2::new(point.x - self.gun_x, point.y);
        let mut angle = vector_angle(sight, Vec2::X).to_degrees();

        self.invert = false;
        if angle > 90.0 {
            angle -= 90.0;
            self.invert = true;
        }
        self.rotate_angle = angle - ANGLE_CORRECTION;
    }

    /// Current reload state, ending the reload once its delay has passed
    pub fn phase(&mut self, now: f32) -> WeaponPhase {
        if let WeaponPhase::Reloading { since } = self.phase
            && now - since >= RELOAD_DURATION
        {
            self.phase = WeaponPhase::Ready;
        }
        self.phase
    }

    /// Rounds shown to the player: zero while reloading
    pub fn bullets_count(&mut self, now: f32) -> usize {
        match self.phase(now) {
            WeaponPhase::Reloading { .. } => 0,
            WeaponPhase::Ready => self.ready.len(),
        }
    }

    fn cooling_down(&self, now: f32) -> bool {
        self.last_shot.is_some_and(|t| now - t < FIRE_COOLDOWN)
    }

    /// Fire one round. Returns false, changing nothing, when the magazine
    /// is empty, the gun is cooling down or a reload is in progress.
    pub fn fire(&mut self, now: f32, fx: &mut dyn Feedback) -> bool {
        if self.ready.is_empty() || self.cooling_down(now) {
            return false;
        }
        if matches!(self.phase(now), WeaponPhase::Reloading { .. }) {
            return false;
        }
        let Some(mut bullet) = self.ready.pop() else {
            return false;
        };

        bullet.aim_point = self.aim;
        bullet.invert = self.invert;

        // Muzzle: far corner of the gun sprite rotated to the aim
        let rotate_angle = if self.invert {
            self.rotate_angle - 90.0
        } else {
            self.rotate_angle
        };
        let (sin, cos) = rotate_angle.to_radians().sin_cos();
        let w = self.width as f32;
        let h = self.height as f32;
        let init_x = w * cos - h * sin + self.gun_x;
        let init_y = h * cos + w * sin;

        bullet.pos = Vec2::new(
            if self.invert { self.win_width - init_x } else { init_x },
            init_y.abs(),
        );
        bullet.calc_angles(rotate_angle + ANGLE_CORRECTION);

        fx.play(SoundEffect::Shot);
        fx.spawn(VisualEffect::Shot, bullet.draw_origin());
        log::debug!(
            "Fired round {} from ({:.1}, {:.1}) at {:.1}°, {} left",
            bullet.id,
            bullet.pos.x,
            bullet.pos.y,
            bullet.system_angle,
            self.ready.len()
        );

        self.in_flight.push(bullet);
        self.last_shot = Some(now);
        true
    }

    /// Refill the magazine.
    ///
    /// `forced` is a full restart: effects of rounds in flight are
    /// finished and both pools are rebuilt with no reload delay. Otherwise
    /// the magazine is topped up and the gun reads empty for the reload
    /// delay.
    pub fn reload(&mut self, forced: bool, now: f32, fx: &mut dyn Feedback) {
        if forced {
            for p in &mut self.in_flight {
                if let Some(h) = p.fly_effect.take() {
                    fx.finish(h);
                }
            }
            self.in_flight.clear();
            self.ready.clear();
            self.phase = WeaponPhase::Ready;
        } else {
            fx.play(SoundEffect::Reload);
            self.phase = WeaponPhase::Reloading { since: now };
        }

        self.refill();
        self.clock.reset(now);
        log::debug!("Reloaded (forced: {}), {} rounds", forced, self.ready.len());
    }

    fn refill(&mut self) {
        let missing = self.magazine_size.saturating_sub(self.ready.len());
        for _ in 0..missing {
            let mut p = Projectile::new(self.next_id, self.kind, self.muzzle_speed, self.bullet_sprite);
            self.next_id += 1;
            if let Some(coeffs) = self.ballistics {
                p.set_coefficients(coeffs);
            }
            self.ready.push(p);
        }
    }

    /// Sample the frame clock and advance by the scaled delta
    pub fn update(&mut self, now: f32, targets: &mut TargetPool, fx: &mut dyn Feedback) -> usize {
        let dt = self.clock.tick(now);
        self.advance_frame(dt, targets, fx)
    }

    /// Move every round in flight, resolve hits and drop spent rounds.
    ///
    /// Returns the number of targets hit this frame.
    pub fn advance_frame(&mut self, dt: f32, targets: &mut TargetPool, fx: &mut dyn Feedback) -> usize {
        let mut hits = 0;

        for p in &mut self.in_flight {
            p.advance(dt);

            if !p.spent && targets.check_hit(p.pos, p.size as f32, p.velocity(), p.damage) {
                p.spent = true;
                hits += 1;
            }

            track_effects(p, fx);
        }

        self.in_flight.retain(|p| !p.spent);
        hits
    }
}

/// Keep the trail on a round in flight and burst where it was spent
fn track_effects(p: &mut Projectile, fx: &mut dyn Feedback) {
    let at = p.draw_origin();

    if p.fly_effect.is_none() && !p.spent {
        p.fly_effect = fx.spawn(VisualEffect::FlyBullet, at);
    }
    if let Some(h) = p.fly_effect {
        fx.update(h, at);
        if p.spent {
            fx.finish(h);
            p.fly_effect = None;
        }
    }

    if p.spent {
        fx.spawn(VisualEffect::HitObject, at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{FeedbackLog, Silent};
    use crate::sim::pool::Arena;
    use crate::sim::target::{Target, TargetKind};

    fn settings(bullets: i32) -> Settings {
        Settings {
            width: 1024,
            height: 768,
            count_target: 0,
            bullet_count: bullets,
            speed: 100,
            ..Settings::default()
        }
    }

    fn gun(bullets: i32) -> Weapon {
        // gun sprite 128x64, pivot at x = 512
        Weapon::new(&settings(bullets), &SpriteSheet::standard(), 0.0)
    }

    fn open_pool() -> TargetPool {
        TargetPool::new(Arena::new(Vec2::splat(-10_000.0), Vec2::splat(10_000.0)), 0.0)
    }

    #[test]
    fn test_new_has_full_magazine() {
        let mut w = gun(5);
        assert_eq!(w.bullets_count(0.0), 5);
        assert_eq!(w.width(), 128);
        assert_eq!(w.height(), 64);
        assert!(w.in_flight().is_empty());
    }

    #[test]
    fn test_magazine_lifecycle() {
        let mut w = gun(3);
        let mut fx = FeedbackLog::new();

        for i in 0..3 {
            assert!(w.fire(i as f32 * 0.6, &mut fx));
        }
        assert_eq!(w.ready_count(), 0);
        assert_eq!(w.in_flight().len(), 3);

        let events = fx.events.len();
        assert!(!w.fire(10.0, &mut fx));
        assert_eq!(w.in_flight().len(), 3);
        assert_eq!(fx.events.len(), events);

        w.reload(false, 11.0, &mut fx);
        assert_eq!(w.ready_count(), 3);
        assert_eq!(w.in_flight().len(), 3);
        assert_eq!(fx.sounds().last(), Some(SoundEffect::Reload));
    }

    #[test]
    fn test_reload_delay_hides_rounds_and_blocks_fire() {
        let mut w = gun(2);
        let mut fx = FeedbackLog::new();
        assert!(w.fire(0.0, &mut fx));

        w.reload(false, 1.0, &mut fx);
        assert_eq!(w.ready_count(), 2);
        assert_eq!(w.bullets_count(1.5), 0);
        assert!(!w.fire(1.5, &mut fx));
        assert_eq!(w.ready_count(), 2);

        assert_eq!(w.bullets_count(2.0), 2);
        assert_eq!(w.phase(2.0), WeaponPhase::Ready);
        assert!(w.fire(2.0, &mut fx));
    }

    #[test]
    fn test_fire_cooldown() {
        let mut w = gun(5);
        let mut fx = Silent;
        assert!(w.fire(0.0, &mut fx));
        assert!(!w.fire(0.3, &mut fx));
        assert!(!w.fire(0.49, &mut fx));
        assert!(w.fire(0.5, &mut fx));
        assert_eq!(w.ready_count(), 3);
    }

    #[test]
    fn test_fire_is_lifo() {
        let mut w = gun(4);
        assert!(w.fire(0.0, &mut Silent));
        assert_eq!(w.in_flight()[0].id, 4);
        assert!(w.fire(1.0, &mut Silent));
        assert_eq!(w.in_flight()[1].id, 3);
    }

    #[test]
    fn test_aim_right() {
        let mut w = gun(1);
        w.aim_at(Vec2::new(612.0, 100.0));
        assert!(!w.is_inverted());
        assert!(w.rotate_angle().abs() < 1e-3);

        let mut fx = FeedbackLog::new();
        assert!(w.fire(0.0, &mut fx));
        let p = &w.in_flight()[0];
        assert!((p.pos - Vec2::new(640.0, 64.0)).length() < 1e-3);
        assert!((p.system_angle - 45.0).abs() < 1e-3);
        let v = p.velocity();
        assert!((v.x - 70.7107).abs() < 1e-3);
        assert!((v.y - 70.7107).abs() < 1e-3);
        assert_eq!(p.aim_point, Vec2::new(612.0, 100.0));

        assert_eq!(fx.sounds().collect::<Vec<_>>(), vec![SoundEffect::Shot]);
        assert_eq!(fx.spawned(VisualEffect::Shot), 1);
    }

    #[test]
    fn test_aim_left_inverts() {
        let mut w = gun(1);
        w.aim_at(Vec2::new(412.0, 100.0));
        assert!(w.is_inverted());
        assert!(w.rotate_angle().abs() < 1e-3);

        assert!(w.fire(0.0, &mut Silent));
        let p = &w.in_flight()[0];
        assert!(p.invert);
        // rotation -90: x = 64 + 512 mirrored, y = |-128|
        assert!((p.pos - Vec2::new(448.0, 128.0)).length() < 1e-3);
        let v = p.velocity();
        assert!((v.x + 70.7107).abs() < 1e-3);
        assert!((v.y - 70.7107).abs() < 1e-3);
    }

    #[test]
    fn test_aim_at_pivot_is_finite() {
        let mut w = gun(1);
        w.aim_at(Vec2::new(512.0, 0.0));
        assert!(w.rotate_angle().is_finite());
        assert!(w.fire(0.0, &mut Silent));
        assert!(w.in_flight()[0].pos.is_finite());
    }

    #[test]
    fn test_end_to_end_single_hit() {
        let sheet = SpriteSheet::standard();
        let mut w = Weapon::new(&settings(1), &sheet, 0.0);
        w.set_ballistics(BallisticCoefficients::NONE);
        w.aim_at(Vec2::new(612.0, 100.0));

        let mut fx = FeedbackLog::new();
        assert!(w.fire(0.0, &mut fx));

        // Park a stationary bomb exactly where the round will be next frame
        let mut lookahead = w.in_flight()[0].clone();
        lookahead.advance(0.1);
        let mut pool = open_pool();
        let id = pool.push(Target::new(0, TargetKind::Bomb, lookahead.pos, Vec2::ZERO, sheet.size_of(keys::BOMB)));

        let hits = w.advance_frame(0.1, &mut pool, &mut fx);
        assert_eq!(hits, 1);
        assert_eq!(pool.get(id).map(|t| t.hit_points), Some(5));
        assert!(w.in_flight().is_empty());
        assert_eq!(fx.spawned(VisualEffect::HitObject), 1);
    }

    #[test]
    fn test_update_scales_clock() {
        let mut w = gun(1);
        w.set_ballistics(BallisticCoefficients::NONE);
        w.aim_at(Vec2::new(612.0, 100.0));
        assert!(w.fire(0.0, &mut Silent));

        let mut lookahead = w.in_flight()[0].clone();
        lookahead.advance(0.1);

        let mut pool = open_pool();
        w.update(0.01, &mut pool, &mut Silent);
        assert!((w.in_flight()[0].pos - lookahead.pos).length() < 1e-3);
    }

    #[test]
    fn test_grounded_round_is_dropped_with_effects() {
        let mut w = gun(1);
        w.aim_at(Vec2::new(612.0, 100.0));
        let mut fx = FeedbackLog::new();
        assert!(w.fire(0.0, &mut fx));

        let mut pool = open_pool();
        for _ in 0..200 {
            if w.in_flight().is_empty() {
                break;
            }
            w.advance_frame(0.5, &mut pool, &mut fx);
        }
        assert!(w.in_flight().is_empty());
        assert_eq!(fx.spawned(VisualEffect::FlyBullet), 1);
        assert_eq!(fx.finished(), 1);
        assert_eq!(fx.spawned(VisualEffect::HitObject), 1);
    }

    #[test]
    fn test_forced_reload_finishes_trails() {
        let mut w = gun(3);
        let mut fx = FeedbackLog::new();
        assert!(w.fire(0.0, &mut fx));
        assert!(w.fire(1.0, &mut fx));
        let mut pool = open_pool();
        w.advance_frame(0.01, &mut pool, &mut fx);
        assert_eq!(fx.spawned(VisualEffect::FlyBullet), 2);

        w.reload(true, 2.0, &mut fx);
        assert_eq!(fx.finished(), 2);
        assert!(w.in_flight().is_empty());
        assert_eq!(w.bullets_count(2.0), 3);
        assert!(!fx.sounds().any(|s| s == SoundEffect::Reload));
    }

    #[test]
    fn test_silent_feedback_does_not_affect_physics() {
        let mut a = gun(1);
        let mut b = gun(1);
        a.aim_at(Vec2::new(700.0, 300.0));
        b.aim_at(Vec2::new(700.0, 300.0));
        assert!(a.fire(0.0, &mut Silent));
        assert!(b.fire(0.0, &mut FeedbackLog::new()));

        let mut pool = open_pool();
        let mut log = FeedbackLog::new();
        for _ in 0..5 {
            a.advance_frame(0.1, &mut pool, &mut Silent);
            b.advance_frame(0.1, &mut pool, &mut log);
        }
        assert_eq!(a.in_flight()[0].pos, b.in_flight()[0].pos);
    }

    #[test]
    fn test_set_ballistics_applies_to_refills() {
        let mut w = gun(2);
        w.set_ballistics(BallisticCoefficients::NONE);
        assert!(w.fire(0.0, &mut Silent));
        w.reload(false, 1.0, &mut Silent);
        assert!(w.fire(3.0, &mut Silent));
        for p in w.in_flight() {
            assert_eq!(p.coefficients(), BallisticCoefficients::NONE);
        }
    }
}
