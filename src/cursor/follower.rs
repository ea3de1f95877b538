//! Pointer Follower
//!
//! Frame-synchronized smoothing of the on-screen cursor toward the latest
//! pointer sample, plus the derived idle and hover flags.
//!
//! # Smoothing
//!
//! Each frame covers a fixed fraction of the remaining distance:
//!
//! ```text
//! d        = target - current
//! factor   = lerp_factor                      if |d| <= boost_threshold_px
//!          = lerp_factor * boost_multiplier   if |d| >  boost_threshold_px
//! current += d * factor
//! ```
//!
//! Large jumps close faster so the cursor never visibly lags, while the tail
//! of the motion eases in at the base rate. The smoothed position is only
//! ever changed by this step, so there is no visual snapping.
//!
//! Samples are not queued: a burst of moves between two frames leaves only
//! the last one as the interpolation target.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::hover::{ElementInfo, HoverConfig, HoverTracker, InteractiveMatcher};
use super::idle::IdleTimer;

/// Configuration for the pointer follower
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowerConfig {
    /// Fraction of the remaining distance covered per frame (0.0-1.0)
    #[serde(default = "default_lerp_factor")]
    pub lerp_factor: f64,

    /// Multiplier applied to the factor for large jumps
    #[serde(default = "default_boost_multiplier")]
    pub boost_multiplier: f64,

    /// Distance above which the boost applies (pixels)
    #[serde(default = "default_boost_threshold")]
    pub boost_threshold_px: f64,

    /// Quiet window before the pointer is considered idle (ms)
    #[serde(default = "default_idle_window")]
    pub idle_window_ms: u64,

    /// Frame period used by the runtime and replay loops (ms)
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
}

fn default_lerp_factor() -> f64 {
    0.35
}
fn default_boost_multiplier() -> f64 {
    1.5
}
fn default_boost_threshold() -> f64 {
    10.0
}
fn default_idle_window() -> u64 {
    super::idle::DEFAULT_IDLE_WINDOW_MS
}
fn default_frame_interval() -> u64 {
    16
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            lerp_factor: default_lerp_factor(),
            boost_multiplier: default_boost_multiplier(),
            boost_threshold_px: default_boost_threshold(),
            idle_window_ms: default_idle_window(),
            frame_interval_ms: default_frame_interval(),
        }
    }
}

impl FollowerConfig {
    /// Factor actually applied for a given remaining distance
    pub fn factor_for(&self, distance: f64) -> f64 {
        if distance > self.boost_threshold_px {
            self.lerp_factor * self.boost_multiplier
        } else {
            self.lerp_factor
        }
    }
}

/// Raw pointer position reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Viewport X (pixels)
    pub x: f64,
    /// Viewport Y (pixels)
    pub y: f64,
    /// Host timestamp (ms)
    pub timestamp_ms: u64,
}

impl PointerSample {
    /// Create a sample
    pub fn new(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self { x, y, timestamp_ms }
    }
}

/// Interpolated cursor position published every frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SmoothedPosition {
    /// Viewport X (pixels)
    pub x: f64,
    /// Viewport Y (pixels)
    pub y: f64,
}

impl SmoothedPosition {
    /// Euclidean distance to a point
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        ((x - self.x).powi(2) + (y - self.y).powi(2)).sqrt()
    }
}

/// Derived cursor flags; both may be set at once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerState {
    /// No pointer movement for the idle window
    pub idle: bool,
    /// Pointer is over an interactive element
    pub hovering: bool,
}

/// Pointer follower state machine
///
/// Owns the smoothed position, the idle timer and the hover flag. Driving it
/// (frame ticks, timer deadlines) is left to the caller.
#[derive(Debug, Clone)]
pub struct PointerFollower {
    config: FollowerConfig,
    current: SmoothedPosition,
    target: Option<(f64, f64)>,
    idle: IdleTimer,
    hover: HoverTracker,
    frames: u64,
}

impl PointerFollower {
    /// Create a follower with the default hover markers
    pub fn new(config: FollowerConfig) -> Self {
        Self::with_hover(config, &HoverConfig::default())
    }

    /// Create a follower with explicit hover markers
    pub fn with_hover(config: FollowerConfig, hover: &HoverConfig) -> Self {
        Self {
            idle: IdleTimer::new(config.idle_window_ms),
            hover: HoverTracker::new(InteractiveMatcher::new(hover)),
            config,
            current: SmoothedPosition::default(),
            target: None,
            frames: 0,
        }
    }

    /// Record a new interpolation target and restart the idle window.
    ///
    /// The smoothed position is not touched here; it moves on the next
    /// [`on_frame_tick`](Self::on_frame_tick).
    pub fn on_pointer_move(&mut self, sample: PointerSample) {
        if self.target.is_none() {
            debug!("First pointer sample at ({:.1}, {:.1})", sample.x, sample.y);
        }
        self.target = Some((sample.x, sample.y));
        self.idle.arm(sample.timestamp_ms);
    }

    /// Advance the smoothed position by one frame and return it
    pub fn on_frame_tick(&mut self) -> SmoothedPosition {
        self.frames += 1;

        let (tx, ty) = self.target.unwrap_or((0.0, 0.0));
        let dx = tx - self.current.x;
        let dy = ty - self.current.y;
        let distance = (dx * dx + dy * dy).sqrt();
        let factor = self.config.factor_for(distance);

        self.current.x += dx * factor;
        self.current.y += dy * factor;

        trace!(
            "Frame {}: pos=({:.2}, {:.2}), dist={:.2}, factor={:.3}",
            self.frames,
            self.current.x,
            self.current.y,
            distance,
            factor
        );

        self.current
    }

    /// Pointer entered an element (ancestry, target first)
    pub fn on_pointer_over(&mut self, target: &[ElementInfo]) {
        self.hover.on_over(target);
    }

    /// Pointer left its element for `related` (`None` = left the document)
    pub fn on_pointer_out(&mut self, related: Option<&[ElementInfo]>) {
        self.hover.on_out(related);
    }

    /// Check the idle deadline; returns `true` when the pointer just went idle
    pub fn poll_idle(&mut self, now_ms: u64) -> bool {
        let fired = self.idle.poll(now_ms);
        if fired {
            debug!("Pointer idle at {}ms", now_ms);
        }
        fired
    }

    /// Pending idle deadline (host ms), if armed
    pub fn idle_deadline(&self) -> Option<u64> {
        self.idle.deadline()
    }

    /// Cancel pending timers. The last position and flags are kept.
    pub fn teardown(&mut self) {
        self.idle.cancel();
    }

    /// Latest smoothed position
    pub fn position(&self) -> SmoothedPosition {
        self.current
    }

    /// Latest interpolation target, if any sample arrived
    pub fn target(&self) -> Option<(f64, f64)> {
        self.target
    }

    /// Whether at least one sample arrived (cursor should be shown)
    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    /// Current idle and hover flags
    pub fn state(&self) -> PointerState {
        PointerState {
            idle: self.idle.is_idle(),
            hovering: self.hover.is_hovering(),
        }
    }

    /// Remaining distance to the target
    pub fn remaining_distance(&self) -> f64 {
        match self.target {
            Some((x, y)) => self.current.distance_to(x, y),
            None => self.current.distance_to(0.0, 0.0),
        }
    }

    /// Frames stepped since creation
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Configuration in use
    pub fn config(&self) -> &FollowerConfig {
        &self.config
    }
}

impl Default for PointerFollower {
    fn default() -> Self {
        Self::new(FollowerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames_to_settle(follower: &mut PointerFollower, epsilon: f64) -> u32 {
        let mut frames = 0;
        while follower.remaining_distance() > epsilon {
            follower.on_frame_tick();
            frames += 1;
            assert!(frames < 10_000, "follower did not converge");
        }
        frames
    }

    #[test]
    fn test_default_config() {
        let config = FollowerConfig::default();
        assert_eq!(config.lerp_factor, 0.35);
        assert_eq!(config.boost_multiplier, 1.5);
        assert_eq!(config.boost_threshold_px, 10.0);
        assert_eq!(config.idle_window_ms, 1000);
    }

    #[test]
    fn test_factor_selection() {
        let config = FollowerConfig::default();
        assert_eq!(config.factor_for(10.0), 0.35);
        assert!((config.factor_for(10.5) - 0.525).abs() < 1e-12);
    }

    #[test]
    fn test_starts_at_origin_without_target() {
        let mut follower = PointerFollower::default();
        assert!(!follower.has_target());
        assert_eq!(follower.on_frame_tick(), SmoothedPosition::default());
    }

    #[test]
    fn test_move_does_not_move_position() {
        let mut follower = PointerFollower::default();
        follower.on_pointer_move(PointerSample::new(100.0, 50.0, 0));
        assert_eq!(follower.position(), SmoothedPosition::default());
    }

    #[test]
    fn test_first_tick_large_jump() {
        let mut follower = PointerFollower::default();
        follower.on_pointer_move(PointerSample::new(100.0, 0.0, 0));

        let pos = follower.on_frame_tick();
        assert!((pos.x - 52.5).abs() < 1e-9, "x = {}", pos.x);
        assert_eq!(pos.y, 0.0);
    }

    #[test]
    fn test_first_tick_small_jump() {
        let mut follower = PointerFollower::default();
        follower.on_pointer_move(PointerSample::new(6.0, 8.0, 0));

        let pos = follower.on_frame_tick();
        assert!((pos.x - 2.1).abs() < 1e-9);
        assert!((pos.y - 2.8).abs() < 1e-9);
    }

    #[test]
    fn test_latest_sample_wins() {
        let mut follower = PointerFollower::default();
        follower.on_pointer_move(PointerSample::new(500.0, 500.0, 0));
        follower.on_pointer_move(PointerSample::new(-40.0, 12.0, 3));
        follower.on_pointer_move(PointerSample::new(200.0, 100.0, 5));

        assert_eq!(follower.target(), Some((200.0, 100.0)));
        frames_to_settle(&mut follower, 0.01);
        let pos = follower.position();
        assert!((pos.x - 200.0).abs() < 0.01);
        assert!((pos.y - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_never_overshoots() {
        let mut follower = PointerFollower::default();
        follower.on_pointer_move(PointerSample::new(300.0, 0.0, 0));
        let mut last = 0.0;
        for _ in 0..60 {
            let pos = follower.on_frame_tick();
            assert!(pos.x >= last && pos.x <= 300.0);
            last = pos.x;
        }
    }

    #[test]
    fn test_large_jump_settles_in_fewer_frames() {
        let mut large = PointerFollower::default();
        large.on_pointer_move(PointerSample::new(100.0, 0.0, 0));
        let large_frames = frames_to_settle(&mut large, 1.0);

        let mut small = PointerFollower::default();
        small.on_pointer_move(PointerSample::new(10.0, 0.0, 0));
        let small_frames = frames_to_settle(&mut small, 0.1);

        assert!(
            large_frames < small_frames,
            "large={} small={}",
            large_frames,
            small_frames
        );
    }

    #[test]
    fn test_idle_and_hover_independent() {
        let mut follower = PointerFollower::default();
        follower.on_pointer_move(PointerSample::new(10.0, 10.0, 0));
        follower.on_pointer_over(&[ElementInfo::new("button")]);
        assert!(follower.poll_idle(1000));

        let state = follower.state();
        assert!(state.idle);
        assert!(state.hovering);
    }

    #[test]
    fn test_move_clears_idle() {
        let mut follower = PointerFollower::default();
        follower.on_pointer_move(PointerSample::new(0.0, 0.0, 0));
        follower.poll_idle(1500);
        assert!(follower.state().idle);

        follower.on_pointer_move(PointerSample::new(1.0, 1.0, 1600));
        assert!(!follower.state().idle);
        assert_eq!(follower.idle_deadline(), Some(2600));
    }

    #[test]
    fn test_teardown_cancels_idle() {
        let mut follower = PointerFollower::default();
        follower.on_pointer_move(PointerSample::new(0.0, 0.0, 0));
        follower.teardown();
        assert_eq!(follower.idle_deadline(), None);
        assert!(!follower.poll_idle(5000));
    }
}
