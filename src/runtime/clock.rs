//! Service clock
//!
//! Milliseconds since a service started, read from tokio's clock so that
//! paused-time tests advance it deterministically.

use std::time::Duration;
use tokio::time::Instant;

/// Monotonic millisecond clock anchored at creation
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    epoch: Instant,
}

impl Clock {
    /// Start counting from now
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    /// Whole milliseconds elapsed since start
    pub fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// Instant corresponding to a clock reading
    pub fn instant_at(&self, ms: u64) -> Instant {
        self.epoch + Duration::from_millis(ms)
    }
}
