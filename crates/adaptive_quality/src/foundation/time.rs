//! Time management utilities

use std::time::{Duration, Instant};

/// Monotonic millisecond clock for one render session
///
/// Readings start at zero when the clock is created and never decrease,
/// which is what [`FrameSampler::record_frame`](crate::performance::FrameSampler::record_frame)
/// expects.
#[derive(Debug, Clone, Copy)]
pub struct SessionClock {
    started: Instant,
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionClock {
    /// Create a clock starting now
    pub fn new() -> Self {
        Self { started: Instant::now() }
    }

    /// Time since the session started
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Milliseconds since the session started
    pub fn now_ms(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }
}
