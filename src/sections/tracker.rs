//! Viewport Section Tracker
//!
//! Turns scroll position into the single section currently in focus.
//!
//! # Rule
//!
//! Sections are tested in priority order; the first one whose bounds satisfy
//!
//! ```text
//! top >= -height / 2  &&  top <= viewport_height / 2
//! ```
//!
//! becomes active. When nothing matches the previous value is kept, so the
//! navigation never flickers to an empty state. Sections that cannot be
//! measured yet are skipped for that pass.
//!
//! # Coalescing
//!
//! [`SectionTracker::on_scroll`] only raises a pending flag. The evaluation
//! runs at the next [`SectionTracker::on_frame`], so any number of scroll
//! events within one frame cost a single evaluation against the latest
//! layout.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::layout::{LayoutSource, SectionId};

/// Configuration for the section tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Sections to evaluate, in priority order
    #[serde(default = "default_order")]
    pub order: Vec<SectionId>,
}

fn default_order() -> Vec<SectionId> {
    SectionId::ALL.to_vec()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            order: default_order(),
        }
    }
}

/// Statistics for monitoring coalescing behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerStats {
    /// Raw scroll notifications received
    pub scroll_events: u64,
    /// Evaluations performed (mount + frames)
    pub evaluations: u64,
    /// Sections skipped because they were not measurable
    pub skipped_measurements: u64,
    /// Changes of the active section
    pub changes: u64,
}

/// Scroll-driven active section state machine
#[derive(Debug, Clone)]
pub struct SectionTracker {
    config: TrackerConfig,
    active: SectionId,
    pending: bool,
    mounted: bool,
    stats: TrackerStats,
}

impl SectionTracker {
    /// Create a tracker. The active section starts at the first configured section.
    pub fn new(config: TrackerConfig) -> Self {
        let active = config.order.first().copied().unwrap_or_default();
        Self {
            config,
            active,
            pending: false,
            mounted: false,
            stats: TrackerStats::default(),
        }
    }

    /// Evaluate immediately so the initial state is right before any scroll
    pub fn mount<L: LayoutSource + ?Sized>(&mut self, layout: &L) -> SectionId {
        self.mounted = true;
        self.pending = false;
        self.evaluate(layout);
        debug!("Section tracker mounted, active={}", self.active);
        self.active
    }

    /// Raw scroll notification.
    ///
    /// Returns `true` if this event scheduled an evaluation, `false` if it
    /// was coalesced into one already pending.
    pub fn on_scroll(&mut self) -> bool {
        self.stats.scroll_events += 1;
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Frame boundary: run the pending evaluation, if any.
    ///
    /// Returns the new section when the active section changed.
    pub fn on_frame<L: LayoutSource + ?Sized>(&mut self, layout: &L) -> Option<SectionId> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        self.evaluate(layout)
    }

    /// Run one evaluation pass; returns the new section if it changed
    pub fn evaluate<L: LayoutSource + ?Sized>(&mut self, layout: &L) -> Option<SectionId> {
        self.stats.evaluations += 1;
        let viewport_height = layout.viewport_height();

        let mut matched = None;
        for &id in &self.config.order {
            let Some(bounds) = layout.measure(id) else {
                self.stats.skipped_measurements += 1;
                trace!("Section {} not measurable yet, skipping", id);
                continue;
            };
            if bounds.in_focus(viewport_height) {
                matched = Some(id);
                break;
            }
        }

        match matched {
            Some(id) if id != self.active => {
                debug!("Active section: {} -> {}", self.active, id);
                self.active = id;
                self.stats.changes += 1;
                Some(id)
            }
            Some(_) => None,
            None => {
                trace!("No section in focus, keeping {}", self.active);
                None
            }
        }
    }

    /// Current active section
    pub fn active(&self) -> SectionId {
        self.active
    }

    /// Whether an evaluation is waiting for the next frame
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Whether [`mount`](Self::mount) ran
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Drop any pending evaluation
    pub fn teardown(&mut self) {
        self.pending = false;
        self.mounted = false;
    }

    /// Coalescing statistics
    pub fn stats(&self) -> TrackerStats {
        self.stats
    }
}

impl Default for SectionTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}
