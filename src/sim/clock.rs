//! Per-subsystem frame timing
//!
//! Each subsystem samples the shared elapsed-time source once per frame and
//! turns the delta into its own simulation dt using a fixed multiplier.

/// Converts consecutive clock samples into scaled frame deltas
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    scale: f32,
    prev: f32,
}

impl FrameClock {
    /// Create a clock whose epoch is `now`
    pub fn new(scale: f32, now: f32) -> Self {
        Self { scale, prev: now }
    }

    /// Restart timing from `now` without producing a delta
    pub fn reset(&mut self, now: f32) {
        self.prev = now;
    }

    /// Scaled time elapsed since the previous sample
    pub fn tick(&mut self, now: f32) -> f32 {
        let dt = (now - self.prev) * self.scale;
        self.prev = now;
        dt
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}
