//! Scroll-based section tracking
//!
//! Decides which page section is "in focus" and exposes it as a single
//! [`SectionId`] for navigation highlighting.
//!
//! ```text
//! scroll events ──> on_scroll (pending flag)
//!                        │
//! frame boundary ──> on_frame ──> LayoutSource::measure (per section)
//!                        │
//!                        └─> active SectionId ──> NavBar
//! ```

mod layout;
mod nav;
mod tracker;

pub use layout::{DocumentLayout, LayoutSource, SectionBounds, SectionId};
pub use nav::{NavBar, NavItem};
pub use tracker::{SectionTracker, TrackerConfig, TrackerStats};
