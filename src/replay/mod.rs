//! Trace replay
//!
//! Deterministic, single-threaded re-run of a recorded host session. The
//! same state machines the runtime drives are stepped on a virtual clock,
//! which makes traces useful for regression tests and for tuning the
//! follower without a browser.
//!
//! # Trace Format (JSON)
//!
//! ```json
//! {
//!   "viewport_height": 1000,
//!   "frame_interval_ms": 16,
//!   "sections": [
//!     { "id": "home", "top": 0, "height": 800 },
//!     { "id": "about", "top": 800, "height": 600 }
//!   ],
//!   "events": [
//!     { "at_ms": 0,   "type": "move", "x": 120, "y": 80 },
//!     { "at_ms": 40,  "type": "over", "ancestry": [{ "tag": "a", "classes": [] }] },
//!     { "at_ms": 300, "type": "scroll", "y": 1000 },
//!     { "at_ms": 500, "type": "hide", "section": "projects" },
//!     { "at_ms": 600, "type": "tilt_move", "x": 300, "y": 250,
//!       "rect": { "left": 200, "top": 100, "width": 400, "height": 400 } },
//!     { "at_ms": 700, "type": "modal_open", "title": "Certificate",
//!       "viewport_width": 1440 },
//!     { "at_ms": 800, "type": "modal_key", "key": "Escape" }
//!   ]
//! }
//! ```
//!
//! Section `top` values are document offsets (the layout at scroll 0).
//! The hero intro is mounted at t = 0 and the modal opens against the
//! current replayed scroll offset.
//!
//! # Stepping
//!
//! ```text
//! t = 0, interval, 2*interval, ... until duration
//!   ├─> apply events with at_ms <= t (in trace order)
//!   ├─> poll idle deadline and intro timers at t
//!   ├─> follower frame tick
//!   ├─> tracker frame (pending evaluation only)
//!   └─> emit ReplayFrame
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::cursor::{
    CursorFrame, ElementInfo, PointerFollower, PointerSample, Rect, Tilt, TiltTracker,
};
use crate::intro::{DimOverlay, IntroPhase, IntroSequencer};
use crate::modal::{HostEnvironment, KeyOutcome, ModalContent, ModalHost, ModalKey, ScrollLock};
use crate::sections::{DocumentLayout, SectionBounds, SectionId, SectionTracker};

/// Upper bound on frames a single replay may produce
pub const MAX_REPLAY_FRAMES: u64 = 1_000_000;

/// Result type for replay operations
pub type Result<T> = std::result::Result<T, ReplayError>;

/// Trace loading and replay errors
#[derive(Error, Debug)]
pub enum ReplayError {
    /// Trace is not valid JSON for the trace format
    #[error("Failed to parse trace: {0}")]
    Parse(#[from] serde_json::Error),

    /// Frame interval resolved to zero
    #[error("Frame interval must be greater than zero")]
    ZeroFrameInterval,

    /// Events must be sorted by timestamp
    #[error("Event {index} at {at_ms}ms is earlier than the event before it")]
    UnorderedEvents {
        /// Index of the offending event
        index: usize,
        /// Its timestamp
        at_ms: u64,
    },

    /// A section is listed twice
    #[error("Section '{0}' is listed more than once")]
    DuplicateSection(SectionId),

    /// Duration and interval would produce more than [`MAX_REPLAY_FRAMES`]
    #[error("Replay of {duration_ms}ms at {interval_ms}ms frames exceeds {max} frames")]
    TooManyFrames {
        /// Resolved replay length
        duration_ms: u64,
        /// Resolved frame interval
        interval_ms: u64,
        /// Frame limit
        max: u64,
    },
}

/// Host event recorded in a trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceEvent {
    /// Pointer moved
    Move {
        /// Viewport x
        x: f64,
        /// Viewport y
        y: f64,
    },
    /// Pointer entered an element
    Over {
        /// Target ancestry, target first
        ancestry: Vec<ElementInfo>,
    },
    /// Pointer left its element
    Out {
        /// Related target ancestry (`null` = left the document)
        #[serde(default)]
        related: Option<Vec<ElementInfo>>,
    },
    /// Page scrolled to an offset
    Scroll {
        /// New scroll offset
        y: f64,
    },
    /// Section stopped rendering
    Hide {
        /// Section
        section: SectionId,
    },
    /// Section rendered again at its original place
    Show {
        /// Section
        section: SectionId,
    },
    /// Pointer moved over the profile image
    TiltMove {
        /// Viewport x
        x: f64,
        /// Viewport y
        y: f64,
        /// Image rectangle
        rect: Rect,
    },
    /// Pointer left the profile image
    TiltLeave,
    /// Document viewer opened
    ModalOpen {
        /// Dialog title
        title: String,
        /// Body content
        #[serde(default)]
        content: String,
        /// Focusable elements inside the dialog
        #[serde(default = "default_focusable_count")]
        focusable_count: usize,
        /// Viewport width at open time
        viewport_width: f64,
        /// Browser user agent
        #[serde(default)]
        user_agent: String,
        /// Element focused before opening
        #[serde(default)]
        focused_element: Option<String>,
    },
    /// Key pressed while the viewer is up
    ModalKey {
        /// Key
        key: ModalKey,
    },
    /// Mouse down on the viewer overlay
    OverlayClick {
        /// Inside the dialog box rather than the backdrop
        #[serde(default)]
        on_content: bool,
    },
}

fn default_focusable_count() -> usize {
    1
}

/// Event with its host timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    /// Host time (ms)
    pub at_ms: u64,
    /// Event
    #[serde(flatten)]
    pub event: TraceEvent,
}

/// Recorded host session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trace {
    /// Viewport height (pixels)
    pub viewport_height: f64,
    /// Frame period; falls back to the configured one unless overridden
    #[serde(default)]
    pub frame_interval_ms: Option<u64>,
    /// Replay length; defaults to one idle window past the last event
    #[serde(default)]
    pub duration_ms: Option<u64>,
    /// Section geometry at scroll 0
    #[serde(default)]
    pub sections: Vec<SectionBounds>,
    /// Events in timestamp order
    #[serde(default)]
    pub events: Vec<TimedEvent>,
}

impl Trace {
    /// Parse a JSON trace
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replace the recorded frame period with an explicit override
    pub fn override_frame_interval(&mut self, interval_ms: Option<u64>) {
        if let Some(interval) = interval_ms {
            debug!(
                "Frame interval override {}ms replaces trace value {:?}",
                interval, self.frame_interval_ms
            );
            self.frame_interval_ms = Some(interval);
        }
    }

    fn validate(&self) -> Result<()> {
        let mut last = 0;
        for (index, event) in self.events.iter().enumerate() {
            if event.at_ms < last {
                return Err(ReplayError::UnorderedEvents {
                    index,
                    at_ms: event.at_ms,
                });
            }
            last = event.at_ms;
        }

        let mut seen = Vec::with_capacity(self.sections.len());
        for bounds in &self.sections {
            if seen.contains(&bounds.id) {
                return Err(ReplayError::DuplicateSection(bounds.id));
            }
            seen.push(bounds.id);
        }
        Ok(())
    }
}

/// State emitted after each replayed frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplayFrame {
    /// Virtual time of the frame (ms)
    pub at_ms: u64,
    /// Cursor render state
    pub cursor: CursorFrame,
    /// Active section
    pub active_section: SectionId,
    /// Hero intro phase
    pub intro: IntroPhase,
    /// Dim overlay over the hero
    pub overlay: DimOverlay,
    /// Profile image rotation
    pub tilt: Tilt,
    /// Scroll lock of the open document viewer (`None` when closed)
    pub modal: Option<ScrollLock>,
}

/// Everything a trace event can act on
struct Scene {
    follower: PointerFollower,
    tracker: SectionTracker,
    layout: DocumentLayout,
    originals: HashMap<SectionId, SectionBounds>,
    intro: IntroSequencer,
    tilt: TiltTracker,
    modal: ModalHost,
}

/// Replay `trace` with the behaviour described by `config`
pub fn replay(trace: &Trace, config: &Config) -> Result<Vec<ReplayFrame>> {
    trace.validate()?;

    let interval = trace
        .frame_interval_ms
        .unwrap_or(config.follower.frame_interval_ms);
    if interval == 0 {
        return Err(ReplayError::ZeroFrameInterval);
    }

    let last_event = trace.events.last().map_or(0, |e| e.at_ms);
    let duration = trace.duration_ms.unwrap_or_else(|| {
        last_event
            .saturating_add(config.follower.idle_window_ms)
            .saturating_add(interval)
    });

    let frame_count = (duration / interval).saturating_add(1);
    if frame_count > MAX_REPLAY_FRAMES {
        return Err(ReplayError::TooManyFrames {
            duration_ms: duration,
            interval_ms: interval,
            max: MAX_REPLAY_FRAMES,
        });
    }

    let mut layout = DocumentLayout::new(trace.viewport_height);
    for bounds in &trace.sections {
        layout.set_section(bounds.id, bounds.top, bounds.height);
    }

    let mut scene = Scene {
        follower: PointerFollower::with_hover(config.follower.clone(), &config.hover),
        tracker: SectionTracker::new(config.tracker.clone()),
        layout,
        originals: trace.sections.iter().map(|b| (b.id, *b)).collect(),
        intro: IntroSequencer::new(config.intro.clone()),
        tilt: TiltTracker::new(config.tilt.clone()),
        modal: ModalHost::new(config.modal.clone()),
    };
    scene.tracker.mount(&scene.layout);
    scene.intro.mount(0);

    info!(
        "Replaying {} events over {}ms ({}ms frames)",
        trace.events.len(),
        duration,
        interval
    );

    let mut events = trace.events.iter().peekable();
    let mut frames = Vec::with_capacity(frame_count as usize);
    let mut now: u64 = 0;

    loop {
        while let Some(timed) = events.next_if(|e| e.at_ms <= now) {
            scene.apply(timed);
        }

        scene.follower.poll_idle(now);
        scene.intro.poll(now);
        scene.follower.on_frame_tick();
        scene.tracker.on_frame(&scene.layout);

        frames.push(ReplayFrame {
            at_ms: now,
            cursor: CursorFrame::capture(&scene.follower),
            active_section: scene.tracker.active(),
            intro: scene.intro.phase(),
            overlay: scene.intro.overlay(),
            tilt: scene.tilt.tilt(),
            modal: scene.modal.scroll_lock(),
        });

        match now.checked_add(interval) {
            Some(next) if next <= duration => now = next,
            _ => break,
        }
    }

    scene.follower.teardown();
    scene.tracker.teardown();
    scene.intro.teardown();
    debug!("Replay produced {} frames", frames.len());
    Ok(frames)
}

impl Scene {
    fn apply(&mut self, timed: &TimedEvent) {
        match &timed.event {
            TraceEvent::Move { x, y } => {
                self.follower
                    .on_pointer_move(PointerSample::new(*x, *y, timed.at_ms));
            }
            TraceEvent::Over { ancestry } => self.follower.on_pointer_over(ancestry),
            TraceEvent::Out { related } => self.follower.on_pointer_out(related.as_deref()),
            TraceEvent::Scroll { y } => self.scroll_to(*y),
            TraceEvent::Hide { section } => {
                self.layout.remove_section(*section);
            }
            TraceEvent::Show { section } => match self.originals.get(section) {
                Some(bounds) => self.layout.set_section(*section, bounds.top, bounds.height),
                None => debug!("Ignoring show for unknown section {}", section),
            },
            TraceEvent::TiltMove { x, y, rect } => {
                self.tilt.on_pointer_move(*x, *y, *rect);
            }
            TraceEvent::TiltLeave => {
                self.tilt.on_pointer_leave();
            }
            TraceEvent::ModalOpen {
                title,
                content,
                focusable_count,
                viewport_width,
                user_agent,
                focused_element,
            } => {
                let env = HostEnvironment {
                    viewport_width: *viewport_width,
                    user_agent: user_agent.clone(),
                    scroll_y: self.layout.scroll_y(),
                    focused_element: focused_element.clone(),
                };
                let content = ModalContent {
                    title: title.clone(),
                    content: content.clone(),
                    focusable_count: *focusable_count,
                };
                self.modal.open(content, &env);
            }
            TraceEvent::ModalKey { key } => {
                if let KeyOutcome::Dismissed(effects) = self.modal.handle_key(*key) {
                    self.restore_scroll(effects.restore_scroll_y);
                }
            }
            TraceEvent::OverlayClick { on_content } => {
                if let Some(effects) = self.modal.overlay_click(*on_content) {
                    self.restore_scroll(effects.restore_scroll_y);
                }
            }
        }
    }

    fn scroll_to(&mut self, y: f64) {
        self.layout.scroll_to(y);
        self.tracker.on_scroll();
    }

    fn restore_scroll(&mut self, restore_scroll_y: Option<i64>) {
        if let Some(y) = restore_scroll_y {
            debug!("Restoring scroll {} after modal close", y);
            self.scroll_to(y as f64);
        }
    }
}
