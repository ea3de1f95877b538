//! # portfolio-motion
//!
//! Interaction engine for a single-page portfolio site. It consumes pointer,
//! scroll and keyboard notifications from a host (browser shell, webview,
//! test harness, recorded trace) and produces render state. It never draws
//! anything itself.
//!
//! # Architecture
//!
//! ```text
//! portfolio-motion
//!   ├─> Pointer Follower (smoothed cursor, idle + hover flags, card tilt)
//!   ├─> Section Tracker (active section from viewport geometry)
//!   ├─> Intro Sequencer (title → reveal → overlay fade)
//!   ├─> Contact (form validation, delivery service, link confirmation)
//!   ├─> Modal Host (document viewer, focus trap, scroll lock)
//!   └─> Runtime (tokio frame / scroll / idle loops) and Trace Replay
//! ```
//!
//! # Data Flow
//!
//! **Cursor Path:** Host pointer events → PointerFollowerService → CursorFrame watch
//!
//! **Section Path:** Host scroll events → SectionTrackerService → SectionId watch
//!
//! **Replay Path:** Trace JSON → replay() → ReplayFrame per frame

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Configuration loading and validation
pub mod config;

/// Pointer follower: smoothing, idle detection, hover classification, tilt
pub mod cursor;

/// Viewport section tracking and navigation highlight
pub mod sections;

/// Hero intro sequencing
pub mod intro;

/// Contact form and contact links
pub mod contact;

/// Document-viewer modal
pub mod modal;

/// tokio services driving the cursor and section state machines
pub mod runtime;

/// Deterministic replay of recorded host traces
pub mod replay;

/// Utility functions
pub mod utils;

pub use config::Config;
pub use cursor::{CursorFrame, PointerFollower, PointerSample, PointerState, SmoothedPosition};
pub use replay::{replay, ReplayFrame, Trace};
pub use runtime::{PointerFollowerService, SectionTrackerService};
pub use sections::{SectionBounds, SectionId, SectionTracker};
