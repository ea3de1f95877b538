//! Custom cursor engine
//!
//! This module drives the custom cursor: a smoothed position that trails the
//! real pointer, plus two state flags the renderer turns into classes.
//!
//! # Components
//!
//! | Component | Input | Output |
//! |-----------|-------|--------|
//! | [`PointerFollower`] | moves, frame ticks | [`SmoothedPosition`] |
//! | [`IdleTimer`] | moves, clock | `idle` after 1000ms quiet |
//! | [`HoverTracker`] | over/out ancestry | `hovering` |
//! | [`TiltTracker`] | moves over the profile image | [`Tilt`] |
//!
//! # Architecture
//!
//! ```text
//! Host Events
//!   ├─> on_pointer_move ──> target + idle re-arm
//!   ├─> on_pointer_over/out ──> hover flag
//!   └─> frame tick ──> interpolate ──> CursorFrame ──> renderer
//! ```
//!
//! The follower is plain state; [`crate::runtime`] schedules it on tokio and
//! [`crate::replay`] steps it deterministically.

mod follower;
mod hover;
mod idle;
mod tilt;
mod view;

pub use follower::{FollowerConfig, PointerFollower, PointerSample, PointerState, SmoothedPosition};
pub use hover::{ElementInfo, HoverConfig, HoverTracker, InteractiveMatcher};
pub use idle::{IdleTimer, DEFAULT_IDLE_WINDOW_MS};
pub use tilt::{Rect, Tilt, TiltConfig, TiltTracker};
pub use view::{CursorFrame, CURSOR_CLASS};
