//! Navigation highlight
//!
//! The header shows one link per content section. Home is reached through
//! the logo instead, so while Home is active no link is highlighted.

use serde::{Deserialize, Serialize};

use super::layout::SectionId;

/// Rendered navigation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Target section
    pub section: SectionId,
    /// Link text
    pub label: &'static str,
    /// In-page anchor
    pub href: String,
    /// Carries the `active` class
    pub active: bool,
}

/// Header navigation links
#[derive(Debug, Clone)]
pub struct NavBar {
    links: Vec<(SectionId, &'static str)>,
}

impl NavBar {
    /// The standard header links
    pub fn new() -> Self {
        Self {
            links: vec![
                (SectionId::About, "About"),
                (SectionId::Projects, "Projects"),
                (SectionId::Achievements, "Achievements"),
                (SectionId::Connect, "Connect"),
            ],
        }
    }

    /// Links with the active flag set for `active`
    pub fn items(&self, active: SectionId) -> Vec<NavItem> {
        self.links
            .iter()
            .map(|&(section, label)| NavItem {
                section,
                label,
                href: format!("#{}", section.anchor()),
                active: section == active,
            })
            .collect()
    }

    /// Label of the highlighted link, if any
    pub fn highlighted(&self, active: SectionId) -> Option<&'static str> {
        self.links
            .iter()
            .find(|(section, _)| *section == active)
            .map(|(_, label)| *label)
    }
}

impl Default for NavBar {
    fn default() -> Self {
        Self::new()
    }
}
