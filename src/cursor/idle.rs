//! Idle Timer
//!
//! Single-shot quiet-window timer for pointer idle detection. Every pointer
//! sample re-arms it; when the deadline passes without a re-arm the pointer
//! is considered idle until the next sample.
//!
//! Time is expressed in host milliseconds so the timer can be driven by a
//! real clock (see [`crate::runtime`]) or by recorded timestamps (see
//! [`crate::replay`]).

use tracing::trace;

/// Default quiet window before the pointer is considered idle (ms)
pub const DEFAULT_IDLE_WINDOW_MS: u64 = 1000;

/// Re-armable idle timer with at most one outstanding deadline
#[derive(Debug, Clone)]
pub struct IdleTimer {
    window_ms: u64,
    deadline_ms: Option<u64>,
    idle: bool,
}

impl IdleTimer {
    /// Create a disarmed timer with the given quiet window
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            deadline_ms: None,
            idle: false,
        }
    }

    /// Clear the idle flag and replace any pending deadline with `now + window`
    pub fn arm(&mut self, now_ms: u64) {
        self.idle = false;
        self.deadline_ms = Some(now_ms.saturating_add(self.window_ms));
    }

    /// Check the deadline against `now_ms`.
    ///
    /// The deadline is inclusive: a check at exactly `arm + window` reports
    /// idle. Returns `true` only on the call that fires the timer.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                self.idle = true;
                trace!("Idle timer fired at {}ms (deadline {}ms)", now_ms, deadline);
                true
            }
            _ => false,
        }
    }

    /// Drop the pending deadline without changing the idle flag
    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    /// Pending deadline, if armed
    pub fn deadline(&self) -> Option<u64> {
        self.deadline_ms
    }

    /// Whether the timer is armed
    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Current idle flag
    pub fn is_idle(&self) -> bool {
        self.idle
    }

    /// Configured quiet window (ms)
    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }
}

impl Default for IdleTimer {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_WINDOW_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_idle_before_first_arm() {
        let mut timer = IdleTimer::default();
        assert!(!timer.poll(10_000));
        assert!(!timer.is_idle());
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_fires_at_exact_window() {
        let mut timer = IdleTimer::default();
        timer.arm(0);

        assert!(!timer.poll(999));
        assert!(!timer.is_idle());

        assert!(timer.poll(1000));
        assert!(timer.is_idle());
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_fires_once() {
        let mut timer = IdleTimer::new(100);
        timer.arm(0);
        assert!(timer.poll(150));
        assert!(!timer.poll(200));
        assert!(timer.is_idle());
    }

    #[test]
    fn test_rearm_replaces_deadline() {
        let mut timer = IdleTimer::default();
        timer.arm(0);
        timer.arm(600);

        assert_eq!(timer.deadline(), Some(1600));
        assert!(!timer.poll(1000));
        assert!(timer.poll(1600));
    }

    #[test]
    fn test_rearm_clears_idle() {
        let mut timer = IdleTimer::default();
        timer.arm(0);
        timer.poll(1000);
        assert!(timer.is_idle());

        timer.arm(1200);
        assert!(!timer.is_idle());
    }

    #[test]
    fn test_cancel() {
        let mut timer = IdleTimer::default();
        timer.arm(0);
        timer.cancel();
        assert!(!timer.poll(5000));
        assert!(!timer.is_idle());
    }
}
