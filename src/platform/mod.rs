//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time/ticks

pub mod time;

pub use time::{ElapsedTime, ManualClock, SystemClock};
