//! Contact link confirmation
//!
//! Every contact card (email, phone, social profiles) asks for confirmation
//! before leaving the page. The prompt wording and the way the link is
//! opened depend on the link scheme.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Contact card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactLink {
    /// Target URL (`mailto:`, `tel:` or web)
    pub href: String,
    /// Card title ("Email", "GitHub", ...)
    pub label: String,
    /// Secondary text (address, handle)
    pub detail: String,
}

impl ContactLink {
    /// Create a card
    pub fn new(
        href: impl Into<String>,
        label: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
            detail: detail.into(),
        }
    }

    /// Scheme-derived kind
    pub fn kind(&self) -> LinkKind {
        LinkKind::from_href(&self.href)
    }
}

/// How a link leaves the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Opens the mail client
    Mailto,
    /// Opens the phone dialer
    Tel,
    /// Opens a web page in a new tab
    External,
}

impl LinkKind {
    /// Classify by scheme prefix
    pub fn from_href(href: &str) -> Self {
        if href.starts_with("mailto:") {
            Self::Mailto
        } else if href.starts_with("tel:") {
            Self::Tel
        } else {
            Self::External
        }
    }
}

/// What the host should do after confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "href", rename_all = "snake_case")]
pub enum OpenAction {
    /// Navigate the current window (mail client / dialer handoff)
    Navigate(String),
    /// Open in a new tab without opener access
    NewTab(String),
}

/// Confirmation dialog state
#[derive(Debug, Clone, Default)]
pub struct ConfirmationPrompt {
    pending: Option<ContactLink>,
}

impl ConfirmationPrompt {
    /// Closed prompt
    pub fn new() -> Self {
        Self::default()
    }

    /// A contact card was activated; open the prompt for it
    pub fn request(&mut self, link: ContactLink) {
        debug!("Confirm requested for {} ({})", link.label, link.href);
        self.pending = Some(link);
    }

    /// Prompt currently open
    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Link awaiting confirmation
    pub fn pending(&self) -> Option<&ContactLink> {
        self.pending.as_ref()
    }

    /// Dialog title, e.g. "Open GitHub?"
    pub fn title(&self) -> Option<String> {
        self.pending.as_ref().map(|l| format!("Open {}?", l.label))
    }

    /// Dialog body text
    pub fn body(&self) -> Option<String> {
        self.pending.as_ref().map(|l| match l.kind() {
            LinkKind::Mailto => format!(
                "You are about to open your email client to send a message to {}.",
                l.label
            ),
            LinkKind::Tel => format!("You are about to open your phone dialer to call {}.", l.label),
            LinkKind::External => format!(
                "You are about to visit {}. This will open in a new tab.",
                l.label
            ),
        })
    }

    /// User confirmed: close the prompt and return the action to perform
    pub fn confirm(&mut self) -> Option<OpenAction> {
        let link = self.pending.take()?;
        Some(match link.kind() {
            LinkKind::Mailto | LinkKind::Tel => OpenAction::Navigate(link.href),
            LinkKind::External => OpenAction::NewTab(link.href),
        })
    }

    /// User cancelled (button, overlay click or Escape)
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
