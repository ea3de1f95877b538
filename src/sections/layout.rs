//! Section identifiers and layout queries

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Named page sections, declared in evaluation priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    /// Hero / landing section
    #[default]
    Home,
    /// About section
    About,
    /// Projects section
    Projects,
    /// Achievements section
    Achievements,
    /// Connect / contact section
    Connect,
}

impl SectionId {
    /// All sections in priority order
    pub const ALL: [SectionId; 5] = [
        SectionId::Home,
        SectionId::About,
        SectionId::Projects,
        SectionId::Achievements,
        SectionId::Connect,
    ];

    /// Anchor id used in the page (`#about`, ...)
    pub fn anchor(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Projects => "projects",
            Self::Achievements => "achievements",
            Self::Connect => "connect",
        }
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.anchor())
    }
}

impl std::str::FromStr for SectionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('#').to_lowercase().as_str() {
            "home" | "main" => Ok(Self::Home),
            "about" => Ok(Self::About),
            "projects" => Ok(Self::Projects),
            "achievements" => Ok(Self::Achievements),
            "connect" | "contact" => Ok(Self::Connect),
            _ => Err(format!("Unknown section: {}", s)),
        }
    }
}

/// Bounding box of a section relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionBounds {
    /// Section
    pub id: SectionId,
    /// Top edge relative to the viewport top (negative once scrolled past)
    pub top: f64,
    /// Rendered height
    pub height: f64,
}

impl SectionBounds {
    /// Whether the section is in focus for a viewport of `viewport_height`.
    ///
    /// In focus from the moment its top reaches the viewport's vertical
    /// midpoint until half of the section has scrolled above the viewport.
    pub fn in_focus(&self, viewport_height: f64) -> bool {
        self.top >= -self.height / 2.0 && self.top <= viewport_height / 2.0
    }
}

/// Read-only view of the live layout
///
/// Implemented by the host. Measurements are taken fresh on every
/// evaluation because lazily loaded content can change section geometry.
pub trait LayoutSource {
    /// Current viewport height (pixels)
    fn viewport_height(&self) -> f64;

    /// Bounds of a section, or `None` if it is not rendered yet
    fn measure(&self, id: SectionId) -> Option<SectionBounds>;
}

impl<L: LayoutSource + ?Sized> LayoutSource for &L {
    fn viewport_height(&self) -> f64 {
        (**self).viewport_height()
    }

    fn measure(&self, id: SectionId) -> Option<SectionBounds> {
        (**self).measure(id)
    }
}

/// Layout shared between a host that mutates it and a running tracker
impl<L: LayoutSource> LayoutSource for RwLock<L> {
    fn viewport_height(&self) -> f64 {
        self.read()
            .unwrap_or_else(PoisonError::into_inner)
            .viewport_height()
    }

    fn measure(&self, id: SectionId) -> Option<SectionBounds> {
        self.read().unwrap_or_else(PoisonError::into_inner).measure(id)
    }
}

/// Document layout described by absolute section offsets and a scroll position
///
/// Used by the replay driver and tests; hosts with a real layout engine
/// implement [`LayoutSource`] directly.
#[derive(Debug, Clone, Default)]
pub struct DocumentLayout {
    viewport_height: f64,
    scroll_y: f64,
    sections: HashMap<SectionId, (f64, f64)>,
}

impl DocumentLayout {
    /// Empty document with the given viewport height
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height,
            scroll_y: 0.0,
            sections: HashMap::new(),
        }
    }

    /// Stack sections top to bottom starting at document offset 0
    pub fn stacked(viewport_height: f64, sections: &[(SectionId, f64)]) -> Self {
        let mut layout = Self::new(viewport_height);
        let mut offset = 0.0;
        for &(id, height) in sections {
            layout.set_section(id, offset, height);
            offset += height;
        }
        layout
    }

    /// Place (or move) a section at a document offset
    pub fn set_section(&mut self, id: SectionId, document_top: f64, height: f64) {
        self.sections.insert(id, (document_top, height));
    }

    /// Mark a section as not rendered
    pub fn remove_section(&mut self, id: SectionId) -> Option<(f64, f64)> {
        self.sections.remove(&id)
    }

    /// Set the scroll offset
    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    /// Current scroll offset
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Change the viewport height
    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    /// Rendered sections at their document offsets, in priority order
    pub fn bounds(&self) -> Vec<SectionBounds> {
        SectionId::ALL
            .iter()
            .filter_map(|id| {
                self.sections.get(id).map(|&(top, height)| SectionBounds {
                    id: *id,
                    top,
                    height,
                })
            })
            .collect()
    }
}

impl LayoutSource for DocumentLayout {
    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn measure(&self, id: SectionId) -> Option<SectionBounds> {
        self.sections.get(&id).map(|&(document_top, height)| SectionBounds {
            id,
            top: document_top - self.scroll_y,
            height,
        })
    }
}
