//! Target interaction and projectile hit detection
//!
//! Targets push each other apart with a spring force proportional to their
//! overlap, using the radius as a mass proxy. Projectiles hit a target when
//! they are inside its circle and roughly on a line through its center.

use glam::Vec2;

use super::target::Target;
use crate::consts::SPRING_K;
use crate::distance;

/// Apply the elastic repulsion between two overlapping targets.
///
/// Both velocities are updated in place from the same force, so calling
/// this for `(a, b)` and then `(b, a)` applies the impulse twice.
/// Non-overlapping or coincident targets are left untouched.
pub fn target_interaction(a: &mut Target, b: &mut Target, dt: f32) {
    let d = distance(a.pos, b.pos);
    let ra = a.radius_f32();
    let rb = b.radius_f32();

    if d >= ra + rb || d == 0.0 {
        return;
    }

    // F = k * overlap, a = F / m with m ~ r
    let force = SPRING_K * (ra + rb - d);
    let dir = (a.pos - b.pos) / d;

    a.vel += force * dir / ra * dt;
    b.vel -= force * dir / rb * dt;
}

/// Test a projectile against a target and apply damage on a hit.
///
/// `point` is the projectile position, `vel` its instantaneous velocity.
/// The target center must be strictly inside the target radius of `point`
/// and the line offset proxy `vx*ty / (vy*tx + vx*py + vy*px)` must not
/// exceed `size` in magnitude. The proxy is coarse and can misjudge shots
/// close to the axes; it is kept as the gallery's hit rule.
pub fn projectile_hits_target(
    target: &mut Target,
    point: Vec2,
    size: f32,
    vel: Vec2,
    damage: i32,
) -> bool {
    let d = distance(target.pos, point);
    if d >= target.radius_f32() {
        return false;
    }

    // Line through `point` along `vel`: vy*x - vx*y + c = 0
    let c = vel.x * point.y + vel.y * point.x;
    let denom = vel.y * target.pos.x + c;
    if denom == 0.0 {
        return false;
    }

    let koeff = vel.x * target.pos.y / denom;
    if !koeff.is_finite() || koeff.abs() > size {
        return false;
    }

    target.hit_points -= damage;
    true
}
