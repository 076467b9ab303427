//! Projectiles fired by the weapon

use glam::Vec2;

use super::ballistics::{BallisticCoefficients, StepOutcome, Trajectory};
use super::sprite::{SpriteSize, keys};
use crate::feedback::EffectHandle;

/// Projectile types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileKind {
    Pistol,
}

/// Per-kind projectile constants
#[derive(Debug, Clone, Copy)]
pub struct ProjectileProfile {
    pub damage: i32,
    pub sprite_key: &'static str,
    /// Spin assumed for the lift term
    pub spin_rpm: f32,
    /// Cross-sectional area, m²
    pub area: f32,
    /// Mass, kg
    pub mass: f32,
}

const PISTOL: ProjectileProfile = ProjectileProfile {
    damage: 15,
    sprite_key: keys::BULLET,
    spin_rpm: 5.0,
    area: 0.0021,
    mass: 0.018,
};

impl ProjectileKind {
    pub fn profile(self) -> &'static ProjectileProfile {
        match self {
            ProjectileKind::Pistol => &PISTOL,
        }
    }

    pub fn coefficients(self) -> BallisticCoefficients {
        let p = self.profile();
        BallisticCoefficients::from_spin(p.spin_rpm, p.area, p.mass)
    }
}

/// A single projectile
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    /// Current position
    pub pos: Vec2,
    /// Where the aim was when fired
    pub aim_point: Vec2,
    /// Firing angle in degrees
    pub system_angle: f32,
    /// Fired to the left
    pub invert: bool,
    pub spent: bool,
    /// Collision size
    pub size: u32,
    pub damage: i32,
    pub draw_offset: Vec2,
    speed: f32,
    trajectory: Trajectory,
    pub(crate) fly_effect: Option<EffectHandle>,
}

impl Projectile {
    pub fn new(id: u32, kind: ProjectileKind, speed: f32, sprite: SpriteSize) -> Self {
        Self {
            id,
            kind,
            pos: Vec2::ZERO,
            aim_point: Vec2::ZERO,
            system_angle: 0.0,
            invert: false,
            spent: false,
            size: sprite.collision_radius(),
            damage: kind.profile().damage,
            draw_offset: sprite.draw_offset(),
            speed,
            trajectory: Trajectory::new(kind.coefficients()),
            fly_effect: None,
        }
    }

    pub fn set_coefficients(&mut self, coeffs: BallisticCoefficients) {
        self.trajectory.set_coefficients(coeffs);
    }

    pub fn coefficients(&self) -> BallisticCoefficients {
        self.trajectory.coefficients()
    }

    /// Launch from the current position at `angle_deg`
    pub fn calc_angles(&mut self, angle_deg: f32) {
        self.trajectory.launch(self.pos, angle_deg, self.speed, self.invert);
        self.system_angle = angle_deg;
    }

    pub fn velocity(&self) -> Vec2 {
        self.trajectory.velocity()
    }

    /// Advance one integration step; grounding marks the projectile spent
    pub fn advance(&mut self, dt: f32) {
        if self.spent {
            return;
        }
        match self.trajectory.step(dt) {
            StepOutcome::Advanced => self.pos = self.trajectory.position(),
            StepOutcome::Grounded => self.spent = true,
        }
    }

    /// Sprite rotation in degrees for the current heading
    pub fn sprite_rotation(&self) -> f32 {
        let vel = self.velocity();
        let speed = vel.length();
        if speed == 0.0 {
            return self.system_angle;
        }
        let heading = (vel.y / speed).clamp(-1.0, 1.0).acos().to_degrees();
        let angle = self.system_angle + if self.invert { heading } else { -heading };
        if self.invert { 180.0 + angle } else { angle }
    }

    /// Top-left corner for drawing the sprite
    pub fn draw_origin(&self) -> Vec2 {
        self.pos - self.draw_offset
    }
}
