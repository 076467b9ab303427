//! Projectile ballistics
//!
//! Point-mass motion under gravity, quadratic drag and a Magnus-like lift,
//! advanced with a fixed-step classical RK4 integrator:
//!
//! ```text
//! dx/dt  = vx
//! dvx/dt = -Cm*vx - Km*vy
//! dy/dt  = vy
//! dvy/dt = -G - Cm*vy + Km*vx
//! ```

use glam::Vec2;

use crate::consts::{G, GROUND_EPSILON, RHO};

/// Dimension of the integrator state
pub const N_DIM: usize = 4;

const X: usize = 0;
const VX: usize = 1;
const Y: usize = 2;
const VY: usize = 3;

type PhaseState = [f32; N_DIM];

/// Precomputed drag (`Cm`) and lift (`Km`) scalars
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallisticCoefficients {
    pub drag: f32,
    pub lift: f32,
}

impl BallisticCoefficients {
    /// Vacuum trajectory: gravity only
    pub const NONE: Self = Self { drag: 0.0, lift: 0.0 };

    /// Derive coefficients from spin (rpm), cross-section (m²) and mass (kg)
    pub fn from_spin(rpm: f32, area: f32, mass: f32) -> Self {
        let w = rpm * std::f32::consts::PI / 30.0;

        let cd = 0.30 + 2.58e-4 * w;
        let cl = 0.3187 * (1.0 - (-2.483e-3 * w).exp());

        Self {
            drag: 0.5 * cd * area * RHO / mass,
            lift: 0.5 * cl * area * RHO / mass,
        }
    }
}

/// Result of a single integration step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// State advanced by dt
    Advanced,
    /// Projectile is below ground; state left untouched
    Grounded,
}

/// RK4 integrator state for one projectile
#[derive(Debug, Clone)]
pub struct Trajectory {
    state: PhaseState,
    coeffs: BallisticCoefficients,
}

impl Trajectory {
    pub fn new(coeffs: BallisticCoefficients) -> Self {
        Self {
            state: [0.0; N_DIM],
            coeffs,
        }
    }

    /// Seed the state from a firing point, angle (degrees) and muzzle speed.
    ///
    /// `invert` mirrors the shot to the left by negating both velocity
    /// components.
    pub fn launch(&mut self, origin: Vec2, angle_deg: f32, speed: f32, invert: bool) {
        let ang = angle_deg.to_radians();
        let sign = if invert { -1.0 } else { 1.0 };

        self.state[X] = origin.x;
        self.state[VX] = speed * ang.cos() * sign;
        self.state[Y] = origin.y;
        self.state[VY] = speed * ang.sin() * sign;
    }

    pub fn coefficients(&self) -> BallisticCoefficients {
        self.coeffs
    }

    pub fn set_coefficients(&mut self, coeffs: BallisticCoefficients) {
        self.coeffs = coeffs;
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.state[X], self.state[Y])
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.state[VX], self.state[VY])
    }

    pub fn is_grounded(&self) -> bool {
        self.state[Y] < GROUND_EPSILON
    }

    fn derivative(&self, s: &PhaseState) -> PhaseState {
        let BallisticCoefficients { drag, lift } = self.coeffs;
        [
            s[VX],
            -drag * s[VX] - lift * s[VY],
            s[VY],
            -G - drag * s[VY] + lift * s[VX],
        ]
    }

    /// Advance by one RK4 step
    pub fn step(&mut self, dt: f32) -> StepOutcome {
        if self.is_grounded() {
            return StepOutcome::Grounded;
        }

        let s = self.state;
        let k1 = self.derivative(&s);
        let k2 = self.derivative(&offset(&s, &k1, 0.5 * dt));
        let k3 = self.derivative(&offset(&s, &k2, 0.5 * dt));
        let k4 = self.derivative(&offset(&s, &k3, dt));

        for i in 0..N_DIM {
            self.state[i] = s[i] + dt * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]) / 6.0;
        }

        StepOutcome::Advanced
    }
}

#[inline]
fn offset(s: &PhaseState, k: &PhaseState, h: f32) -> PhaseState {
    std::array::from_fn(|i| s[i] + h * k[i])
}
