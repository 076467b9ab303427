//! Gallery Shot - ballistic shooting gallery simulation
//!
//! Core modules:
//! - `sim`: Simulation core (ballistics, target interaction, pools, weapon)
//! - `platform`: Elapsed-time sources
//! - `feedback`: Sound and visual-effect notification hooks
//! - `settings`: Key=integer configuration store

pub mod feedback;
pub mod platform;
pub mod settings;
pub mod sim;

pub use feedback::{Feedback, FeedbackLog, LoggingFeedback, Silent};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Simulation tuning constants
pub mod consts {
    /// Acceleration of gravity (m/s²)
    pub const G: f32 = 9.81;
    /// Air density (kg/m³)
    pub const RHO: f32 = 1.23;
    /// Projectiles whose y state drops below this are grounded
    pub const GROUND_EPSILON: f32 = -0.001;

    /// Elastic coefficient for target-target repulsion
    pub const SPRING_K: f32 = 50.0;

    /// Wall-clock multiplier for target motion
    pub const TARGET_TIME_SCALE: f32 = 2.0;
    /// Wall-clock multiplier for projectile motion
    pub const PROJECTILE_TIME_SCALE: f32 = 10.0;

    /// Minimum seconds between two shots
    pub const FIRE_COOLDOWN: f32 = 0.5;
    /// Seconds the magazine reads empty after a reload
    pub const RELOAD_DURATION: f32 = 1.0;
    /// Gun texture inclination (degrees)
    pub const ANGLE_CORRECTION: f32 = 45.0;

    /// Targets with a spawn index below this are SuperBombs
    pub const SUPER_BOMB_SLOTS: usize = 10;
    /// Fraction of the window targets may spawn in
    pub const SPAWN_FRACTION: f32 = 0.7;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unsigned angle between two vectors in radians, in [0, π]
///
/// Returns 0 when either vector has zero length.
pub fn vector_angle(a: Vec2, b: Vec2) -> f32 {
    let denom = a.length() * b.length();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos()
}
