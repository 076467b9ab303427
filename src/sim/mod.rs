//! Shooting gallery simulation
//!
//! All gameplay physics lives here. The module has no rendering or audio
//! dependencies; those are reached through the `Feedback` hooks.
//! - Explicit dt threaded through every per-frame call
//! - Seeded RNG only
//! - Stable iteration order (insertion order)

pub mod ballistics;
pub mod clock;
pub mod collision;
pub mod pool;
pub mod projectile;
pub mod rng;
pub mod session;
pub mod sprite;
pub mod target;
pub mod weapon;

pub use ballistics::{BallisticCoefficients, StepOutcome, Trajectory};
pub use clock::FrameClock;
pub use collision::{projectile_hits_target, target_interaction};
pub use pool::{Arena, PairSweep, TargetPool};
pub use projectile::{Projectile, ProjectileKind};
pub use rng::SimRng;
pub use session::{MatchPhase, ShooterSession};
pub use sprite::{SpriteSheet, SpriteSize};
pub use target::{Target, TargetKind};
pub use weapon::{Weapon, WeaponPhase};
