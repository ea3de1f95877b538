//! Interactive Hover Detection
//!
//! Classifies the element under the pointer as interactive by walking its
//! ancestry (target first, document root last) for a configured set of tag
//! and class markers, mirroring a `closest("a, button, .clickable, .logo")`
//! query.
//!
//! The hover flag is only cleared when the pointer leaves for a target that
//! is confirmed non-interactive. Moving directly between two interactive
//! elements emits `out` (with the new element as related target) followed by
//! `over`, and neither step drops the flag.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// One node of a hovered element's ancestry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementInfo {
    /// Lowercase tag name ("a", "button", "div", ...)
    pub tag: String,

    /// Class list
    #[serde(default)]
    pub classes: Vec<String>,
}

impl ElementInfo {
    /// Element with a tag and no classes
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
        }
    }

    /// Builder-style class addition
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }
}

/// Markers that make an element interactive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoverConfig {
    /// Tags treated as interactive
    #[serde(default = "default_tags")]
    pub interactive_tags: Vec<String>,

    /// Classes treated as interactive
    #[serde(default = "default_classes")]
    pub interactive_classes: Vec<String>,
}

fn default_tags() -> Vec<String> {
    vec!["a".to_string(), "button".to_string()]
}
fn default_classes() -> Vec<String> {
    vec!["clickable".to_string(), "logo".to_string()]
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            interactive_tags: default_tags(),
            interactive_classes: default_classes(),
        }
    }
}

/// Ancestry-based interactive classifier
#[derive(Debug, Clone)]
pub struct InteractiveMatcher {
    tags: Vec<String>,
    classes: Vec<String>,
}

impl InteractiveMatcher {
    /// Build a matcher from configuration (tags compared case-insensitively)
    pub fn new(config: &HoverConfig) -> Self {
        Self {
            tags: config
                .interactive_tags
                .iter()
                .map(|t| t.to_ascii_lowercase())
                .collect(),
            classes: config.interactive_classes.clone(),
        }
    }

    /// Whether a single element carries an interactive marker
    pub fn matches(&self, element: &ElementInfo) -> bool {
        let tag = element.tag.to_ascii_lowercase();
        self.tags.iter().any(|t| *t == tag)
            || element
                .classes
                .iter()
                .any(|c| self.classes.iter().any(|m| m == c))
    }

    /// Whether any element of the ancestry is interactive
    pub fn is_interactive(&self, ancestry: &[ElementInfo]) -> bool {
        ancestry.iter().any(|e| self.matches(e))
    }
}

impl Default for InteractiveMatcher {
    fn default() -> Self {
        Self::new(&HoverConfig::default())
    }
}

/// Hover flag driven by over/out notifications
#[derive(Debug, Clone, Default)]
pub struct HoverTracker {
    matcher: InteractiveMatcher,
    hovering: bool,
}

impl HoverTracker {
    /// Create a tracker that starts not hovering
    pub fn new(matcher: InteractiveMatcher) -> Self {
        Self {
            matcher,
            hovering: false,
        }
    }

    /// Pointer entered `target` (ancestry, target first)
    pub fn on_over(&mut self, target: &[ElementInfo]) {
        if self.matcher.is_interactive(target) {
            if !self.hovering {
                trace!("Hover: entered interactive element");
            }
            self.hovering = true;
        }
    }

    /// Pointer left its target for `related` (`None` = left the document)
    pub fn on_out(&mut self, related: Option<&[ElementInfo]>) {
        let still_interactive = related.is_some_and(|r| self.matcher.is_interactive(r));
        if !still_interactive {
            if self.hovering {
                trace!("Hover: left interactive element");
            }
            self.hovering = false;
        }
    }

    /// Current hover flag
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// The classifier in use
    pub fn matcher(&self) -> &InteractiveMatcher {
        &self.matcher
    }
}
