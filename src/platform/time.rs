//! Time sources
//!
//! The simulation takes `now` in seconds as an argument and never reads a
//! clock itself. These sources supply that value: wall time for live runs,
//! a manual clock for tests and headless replays.

use std::time::Instant;

/// Seconds elapsed since a source-defined epoch
pub trait ElapsedTime {
    fn elapsed(&self) -> f32;
}

/// Wall-clock time since construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn start() -> Self {
        Self { epoch: Instant::now() }
    }

    /// Restart counting from zero
    pub fn resume(&mut self) {
        self.epoch = Instant::now();
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::start()
    }
}

impl ElapsedTime for SystemClock {
    fn elapsed(&self) -> f32 {
        self.epoch.elapsed().as_secs_f32()
    }
}

/// Clock advanced by hand
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualClock {
    now: f32,
}

impl ManualClock {
    pub fn new(now: f32) -> Self {
        Self { now }
    }

    /// Step forward by `dt` seconds; negative steps are ignored
    pub fn advance(&mut self, dt: f32) -> f32 {
        if dt > 0.0 {
            self.now += dt;
        }
        self.now
    }

    pub fn set(&mut self, now: f32) {
        self.now = now;
    }
}

impl ElapsedTime for ManualClock {
    fn elapsed(&self) -> f32 {
        self.now
    }
}
