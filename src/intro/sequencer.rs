//! Intro phase sequencer
//!
//! The hero section reveals itself in three phases:
//!
//! | Phase | Entered | Visible |
//! |-------|---------|---------|
//! | Hidden | construction | nothing |
//! | Title | mount | centered site title, dim overlay |
//! | Revealed | mount + `title_hold_ms` | logo, profile image, intro block |
//!
//! The dim overlay appears only the first time the title phase is entered.
//! It starts fading when the intro is revealed and is removed
//! `dim_fade_ms` later.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Timing of the intro sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntroConfig {
    /// Time the centered title is held before the reveal (ms)
    #[serde(default = "default_title_hold")]
    pub title_hold_ms: u64,

    /// Overlay fade-out duration once revealed (ms)
    #[serde(default = "default_dim_fade")]
    pub dim_fade_ms: u64,
}

fn default_title_hold() -> u64 {
    1000
}
fn default_dim_fade() -> u64 {
    1600
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            title_hold_ms: default_title_hold(),
            dim_fade_ms: default_dim_fade(),
        }
    }
}

/// Intro phase, ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntroPhase {
    /// Before mount
    #[default]
    Hidden,
    /// Site title centered
    Title,
    /// Hero content shown
    Revealed,
}

/// Dim overlay lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimOverlay {
    /// Not rendered
    #[default]
    Absent,
    /// Rendered fully
    Shown,
    /// Rendered with the fade-out class
    Fading,
}

/// Time-driven intro state machine
#[derive(Debug, Clone, Default)]
pub struct IntroSequencer {
    config: IntroConfig,
    phase: IntroPhase,
    overlay: DimOverlay,
    overlay_shown_once: bool,
    reveal_at_ms: Option<u64>,
    overlay_removal_at_ms: Option<u64>,
}

impl IntroSequencer {
    /// Create a sequencer in the hidden phase
    pub fn new(config: IntroConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Page became interactive: show the title and schedule the reveal
    pub fn mount(&mut self, now_ms: u64) {
        if self.phase != IntroPhase::Hidden {
            return;
        }
        self.phase = IntroPhase::Title;
        self.reveal_at_ms = Some(now_ms.saturating_add(self.config.title_hold_ms));

        if !self.overlay_shown_once {
            self.overlay = DimOverlay::Shown;
            self.overlay_shown_once = true;
        }
        debug!("Intro: title phase at {}ms", now_ms);
    }

    /// Advance timers; returns `true` if anything visible changed
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let mut changed = false;

        if let Some(at) = self.reveal_at_ms {
            if now_ms >= at {
                self.reveal_at_ms = None;
                self.phase = IntroPhase::Revealed;
                if self.overlay == DimOverlay::Shown {
                    self.overlay = DimOverlay::Fading;
                    self.overlay_removal_at_ms = Some(at.saturating_add(self.config.dim_fade_ms));
                }
                debug!("Intro: revealed at {}ms", now_ms);
                changed = true;
            }
        }

        if let Some(at) = self.overlay_removal_at_ms {
            if now_ms >= at {
                self.overlay_removal_at_ms = None;
                self.overlay = DimOverlay::Absent;
                debug!("Intro: overlay removed at {}ms", now_ms);
                changed = true;
            }
        }

        changed
    }

    /// Earliest pending deadline, for scheduling the next poll
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.reveal_at_ms, self.overlay_removal_at_ms) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Cancel pending transitions
    pub fn teardown(&mut self) {
        self.reveal_at_ms = None;
        self.overlay_removal_at_ms = None;
    }

    /// Current phase
    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    /// Overlay state
    pub fn overlay(&self) -> DimOverlay {
        self.overlay
    }

    /// Centered title visible
    pub fn title_visible(&self) -> bool {
        self.phase == IntroPhase::Title
    }

    /// Header logo visible
    pub fn logo_visible(&self) -> bool {
        self.phase >= IntroPhase::Revealed
    }

    /// Intro block (greeting, name, role) visible
    pub fn intro_visible(&self) -> bool {
        self.phase >= IntroPhase::Revealed
    }
}
