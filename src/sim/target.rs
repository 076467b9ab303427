//! Targets and their kind-specific behaviour

use glam::Vec2;
use serde::Serialize;

use super::rng::SimRng;
use super::sprite::{SpriteSize, keys};

/// Target types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TargetKind {
    Bomb,
    SuperBomb,
}

/// Integrates a target's position: `(pos, vel, motion_phase, dt)`
pub type MotionLaw = fn(&mut Vec2, Vec2, &mut f32, f32);

/// Per-kind behaviour table
#[derive(Debug, Clone, Copy)]
pub struct KindProfile {
    pub hit_points: i32,
    /// Initial speed band per axis, pixels/s
    pub speed_min: i32,
    pub speed_max: i32,
    pub sprite_key: &'static str,
    pub motion: MotionLaw,
}

const BOMB: KindProfile = KindProfile {
    hit_points: 20,
    speed_min: 10,
    speed_max: 30,
    sprite_key: keys::BOMB,
    motion: linear_motion,
};

const SUPER_BOMB: KindProfile = KindProfile {
    hit_points: 25,
    speed_min: 50,
    speed_max: 70,
    sprite_key: keys::SUPER_BOMB,
    motion: wobble_motion,
};

impl TargetKind {
    pub fn profile(self) -> &'static KindProfile {
        match self {
            TargetKind::Bomb => &BOMB,
            TargetKind::SuperBomb => &SUPER_BOMB,
        }
    }
}

fn linear_motion(pos: &mut Vec2, vel: Vec2, _phase: &mut f32, dt: f32) {
    *pos += vel * dt;
}

/// Nonlinear drift: each axis is modulated by the accumulated phase
fn wobble_motion(pos: &mut Vec2, vel: Vec2, phase: &mut f32, dt: f32) {
    pos.x += vel.x * dt * phase.cos();
    pos.y += vel.y * dt * phase.sin();
    *phase += dt;
}

/// A target entity
#[derive(Debug, Clone, Serialize)]
pub struct Target {
    pub id: u32,
    pub kind: TargetKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: u32,
    /// Half extent of the sprite box
    pub draw_offset: Vec2,
    pub hit_points: i32,
    pub motion_phase: f32,
}

impl Target {
    pub fn new(id: u32, kind: TargetKind, pos: Vec2, vel: Vec2, sprite: SpriteSize) -> Self {
        Self {
            id,
            kind,
            pos,
            vel,
            radius: sprite.collision_radius(),
            draw_offset: sprite.draw_offset(),
            hit_points: kind.profile().hit_points,
            motion_phase: 0.0,
        }
    }

    /// Create a target with a random velocity from its kind's speed band.
    ///
    /// Both axes share one random sign.
    pub fn spawn(id: u32, kind: TargetKind, pos: Vec2, sprite: SpriteSize, rng: &mut SimRng) -> Self {
        let profile = kind.profile();
        let sign = if rng.flip() { 1.0 } else { -1.0 };
        let vx = sign * rng.real(profile.speed_min, profile.speed_max);
        let vy = sign * rng.real(profile.speed_min, profile.speed_max);
        Self::new(id, kind, pos, Vec2::new(vx, vy), sprite)
    }

    pub fn radius_f32(&self) -> f32 {
        self.radius as f32
    }

    pub fn is_depleted(&self) -> bool {
        self.hit_points <= 0
    }

    /// Apply the kind's motion law for one frame
    pub fn integrate(&mut self, dt: f32) {
        (self.kind.profile().motion)(&mut self.pos, self.vel, &mut self.motion_phase, dt);
    }

    /// Move for one frame and bounce off the arena edges.
    ///
    /// Each edge test is offset by the sprite half extent; on contact the
    /// position is mirrored back inside and the velocity component flips.
    pub fn advance(&mut self, dt: f32, min: Vec2, max: Vec2) {
        self.integrate(dt);

        let r = self.radius_f32();
        let off = self.draw_offset;

        if self.pos.x < min.x + off.x {
            self.pos.x = self.pos.x.abs();
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < min.y + off.y {
            self.pos.y = self.pos.y.abs();
            self.vel.y = -self.vel.y;
        }
        if self.pos.x + r > max.x + off.x {
            self.pos.x = max.x - (max.x - self.pos.x).abs();
            self.vel.x = -self.vel.x;
        }
        if self.pos.y + r > max.y + off.y {
            self.pos.y = max.y - (max.y - self.pos.y).abs();
            self.vel.y = -self.vel.y;
        }
    }
}
