//! Cursor render state
//!
//! What a cursor renderer needs each frame: where to place the cursor
//! element and which state classes to toggle on it.

use serde::{Deserialize, Serialize};

use super::follower::{PointerFollower, PointerState, SmoothedPosition};

/// Base class of the cursor element
pub const CURSOR_CLASS: &str = "custom-cursor";

/// Snapshot published to cursor renderers once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CursorFrame {
    /// Smoothed position
    pub position: SmoothedPosition,
    /// Idle and hover flags
    pub state: PointerState,
    /// False until the first pointer sample
    pub visible: bool,
}

impl CursorFrame {
    /// Capture the follower's current state
    pub fn capture(follower: &PointerFollower) -> Self {
        Self {
            position: follower.position(),
            state: follower.state(),
            visible: follower.has_target(),
        }
    }

    /// Class attribute for the cursor element, e.g. `"custom-cursor idle hover"`
    pub fn class_list(&self) -> String {
        let mut classes = String::from(CURSOR_CLASS);
        if self.state.idle {
            classes.push_str(" idle");
        }
        if self.state.hovering {
            classes.push_str(" hover");
        }
        classes
    }

    /// Inline style positioning the cursor element
    pub fn style(&self) -> String {
        format!("left: {}px; top: {}px", self.position.x, self.position.y)
    }
}
