//! Document-viewer modal host
//!
//! Shows one `{title, content}` document at a time until dismissed.
//!
//! While open the host:
//! - remembers which element had focus and hands it back on close
//! - on mobile, pins the page at the current offset and restores that
//!   offset on close; desktop pages keep scrolling underneath
//! - traps Tab / Shift+Tab inside the dialog's focusable elements
//! - closes on Escape, on the close button and on overlay clicks

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Mobile user-agent markers (matched case-insensitively)
const MOBILE_UA_MARKERS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Modal behaviour settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModalConfig {
    /// Viewport widths at or below this are treated as mobile (pixels)
    #[serde(default = "default_mobile_breakpoint")]
    pub mobile_breakpoint_px: f64,
}

fn default_mobile_breakpoint() -> f64 {
    768.0
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint_px: default_mobile_breakpoint(),
        }
    }
}

/// Document shown in the modal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalContent {
    /// Dialog title (also the accessible label)
    pub title: String,
    /// Body content
    pub content: String,
    /// Number of focusable elements inside the dialog (close button included)
    pub focusable_count: usize,
}

impl ModalContent {
    /// Content with only the close button focusable
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            focusable_count: 1,
        }
    }
}

/// Host environment at the time the modal opens
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostEnvironment {
    /// Viewport width (pixels)
    pub viewport_width: f64,
    /// Browser user agent
    pub user_agent: String,
    /// Current page scroll offset
    pub scroll_y: f64,
    /// Id of the element focused before opening
    pub focused_element: Option<String>,
}

/// Keys the modal reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalKey {
    /// Escape
    Escape,
    /// Tab, with or without Shift
    Tab {
        /// Shift held
        shift: bool,
    },
}

/// Outcome of a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not handled (modal closed or key irrelevant)
    Ignored,
    /// Let the browser move focus normally
    Default,
    /// Default prevented; focus moved to this index
    FocusMoved(usize),
    /// Default prevented; nothing focusable
    Swallowed,
    /// Modal dismissed
    Dismissed(CloseEffects),
}

/// How the page body is locked while the modal is open
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScrollLock {
    /// Body styles untouched
    Unlocked,
    /// Body pinned with `position: fixed; top: -scroll_y`
    Pinned {
        /// Offset to restore on close
        scroll_y: f64,
    },
}

/// Side effects the host must apply after closing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CloseEffects {
    /// Scroll back to this offset (mobile only)
    pub restore_scroll_y: Option<i64>,
    /// Re-focus the previously focused element
    pub restore_focus: bool,
}

#[derive(Debug, Clone)]
struct OpenModal {
    content: ModalContent,
    lock: ScrollLock,
    previous_focus: Option<String>,
    focus_index: Option<usize>,
}

/// Single-slot modal host
#[derive(Debug, Clone, Default)]
pub struct ModalHost {
    config: ModalConfig,
    open: Option<OpenModal>,
    restored_focus: Option<String>,
}

impl ModalHost {
    /// Closed host
    pub fn new(config: ModalConfig) -> Self {
        Self {
            config,
            open: None,
            restored_focus: None,
        }
    }

    /// Whether the environment counts as mobile
    pub fn is_mobile(&self, env: &HostEnvironment) -> bool {
        if env.viewport_width <= self.config.mobile_breakpoint_px {
            return true;
        }
        let ua = env.user_agent.to_lowercase();
        MOBILE_UA_MARKERS.iter().any(|m| ua.contains(m))
    }

    /// Show `content`, replacing anything already open
    pub fn open(&mut self, content: ModalContent, env: &HostEnvironment) -> ScrollLock {
        let lock = if self.is_mobile(env) {
            ScrollLock::Pinned {
                scroll_y: env.scroll_y,
            }
        } else {
            ScrollLock::Unlocked
        };

        debug!("Modal opened: {:?} ({:?})", content.title, lock);
        let previous_focus = match self.open.take() {
            Some(previous) => previous.previous_focus,
            None => env.focused_element.clone(),
        };
        // Focus starts on the dialog container itself
        self.open = Some(OpenModal {
            content,
            lock,
            previous_focus,
            focus_index: None,
        });
        self.restored_focus = None;
        lock
    }

    /// Handle a key press while open
    pub fn handle_key(&mut self, key: ModalKey) -> KeyOutcome {
        let Some(modal) = self.open.as_mut() else {
            return KeyOutcome::Ignored;
        };

        match key {
            ModalKey::Escape => KeyOutcome::Dismissed(self.close()),
            ModalKey::Tab { shift } => {
                let count = modal.content.focusable_count;
                if count == 0 {
                    return KeyOutcome::Swallowed;
                }
                let last = count - 1;
                match (modal.focus_index, shift) {
                    // Shift+Tab from the container would leave the dialog
                    (Some(0) | None, true) => {
                        modal.focus_index = Some(last);
                        KeyOutcome::FocusMoved(last)
                    }
                    (Some(i), false) if i == last => {
                        modal.focus_index = Some(0);
                        KeyOutcome::FocusMoved(0)
                    }
                    (current, shift) => {
                        // Track where the browser will move focus
                        modal.focus_index = Some(match (current, shift) {
                            (None, _) => 0,
                            (Some(i), false) => i + 1,
                            (Some(i), true) => i - 1,
                        });
                        KeyOutcome::Default
                    }
                }
            }
        }
    }

    /// Mouse down on the overlay (`on_content` = inside the dialog box)
    pub fn overlay_click(&mut self, on_content: bool) -> Option<CloseEffects> {
        if on_content || self.open.is_none() {
            return None;
        }
        Some(self.close())
    }

    /// Dismiss the modal and report what the host must restore
    pub fn close(&mut self) -> CloseEffects {
        let Some(modal) = self.open.take() else {
            return CloseEffects::default();
        };
        debug!("Modal closed: {:?}", modal.content.title);

        self.restored_focus = modal.previous_focus.clone();
        CloseEffects {
            restore_scroll_y: match modal.lock {
                ScrollLock::Pinned { scroll_y } => Some(scroll_y.round() as i64),
                ScrollLock::Unlocked => None,
            },
            restore_focus: modal.previous_focus.is_some(),
        }
    }

    /// Whether a modal is displayed
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Displayed content
    pub fn content(&self) -> Option<&ModalContent> {
        self.open.as_ref().map(|m| &m.content)
    }

    /// Active scroll lock
    pub fn scroll_lock(&self) -> Option<ScrollLock> {
        self.open.as_ref().map(|m| m.lock)
    }

    /// Element to re-focus after the last close
    pub fn restored_focus(&self) -> Option<&str> {
        self.restored_focus.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> HostEnvironment {
        HostEnvironment {
            viewport_width: 1440.0,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) Firefox/130.0".to_string(),
            scroll_y: 2400.0,
            focused_element: Some("cert-3".to_string()),
        }
    }

    fn phone() -> HostEnvironment {
        HostEnvironment {
            viewport_width: 1024.0,
            user_agent: "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)".to_string(),
            scroll_y: 1800.0,
            focused_element: None,
        }
    }

    fn cert() -> ModalContent {
        ModalContent {
            title: "AWS Cloud Practitioner".to_string(),
            content: "Issued 2024".to_string(),
            focusable_count: 3,
        }
    }

    #[test]
    fn test_desktop_leaves_scroll_alone() {
        let mut host = ModalHost::default();
        assert_eq!(host.open(cert(), &desktop()), ScrollLock::Unlocked);
        assert_eq!(host.scroll_lock(), Some(ScrollLock::Unlocked));

        let effects = host.close();
        assert_eq!(effects.restore_scroll_y, None);
        assert!(effects.restore_focus);
        assert_eq!(host.restored_focus(), Some("cert-3"));
    }

    #[test]
    fn test_mobile_pins_and_restores_scroll() {
        let mut host = ModalHost::default();
        assert!(host.is_mobile(&phone()));
        assert_eq!(
            host.open(cert(), &phone()),
            ScrollLock::Pinned { scroll_y: 1800.0 }
        );
        let effects = host.close();
        assert_eq!(effects.restore_scroll_y, Some(1800));
        assert!(!effects.restore_focus);
    }

    #[test]
    fn test_narrow_viewport_is_mobile() {
        let host = ModalHost::default();
        let env = HostEnvironment {
            viewport_width: 768.0,
            ..desktop()
        };
        assert!(host.is_mobile(&env));
    }

    #[test]
    fn test_escape_dismisses() {
        let mut host = ModalHost::default();
        host.open(cert(), &desktop());
        assert!(matches!(
            host.handle_key(ModalKey::Escape),
            KeyOutcome::Dismissed(_)
        ));
        assert!(!host.is_open());
        assert_eq!(host.handle_key(ModalKey::Escape), KeyOutcome::Ignored);
    }

    #[test]
    fn test_focus_trap_wraps() {
        let mut host = ModalHost::default();
        host.open(cert(), &desktop());

        let tab = ModalKey::Tab { shift: false };
        let back = ModalKey::Tab { shift: true };

        assert_eq!(host.handle_key(tab), KeyOutcome::Default); // -> 0
        assert_eq!(host.handle_key(tab), KeyOutcome::Default); // -> 1
        assert_eq!(host.handle_key(tab), KeyOutcome::Default); // -> 2
        assert_eq!(host.handle_key(tab), KeyOutcome::FocusMoved(0));
        assert_eq!(host.handle_key(back), KeyOutcome::FocusMoved(2));
    }

    #[test]
    fn test_shift_tab_from_container_wraps_to_last() {
        let mut host = ModalHost::default();
        host.open(cert(), &desktop());

        let back = ModalKey::Tab { shift: true };
        assert_eq!(host.handle_key(back), KeyOutcome::FocusMoved(2));
        assert_eq!(host.handle_key(back), KeyOutcome::Default); // -> 1
        assert_eq!(host.handle_key(back), KeyOutcome::Default); // -> 0
        assert_eq!(host.handle_key(back), KeyOutcome::FocusMoved(2));
    }

    #[test]
    fn test_no_focusables_swallows_tab() {
        let mut host = ModalHost::default();
        let content = ModalContent {
            focusable_count: 0,
            ..cert()
        };
        host.open(content, &desktop());
        assert_eq!(
            host.handle_key(ModalKey::Tab { shift: false }),
            KeyOutcome::Swallowed
        );
    }

    #[test]
    fn test_overlay_click() {
        let mut host = ModalHost::default();
        host.open(cert(), &desktop());
        assert_eq!(host.overlay_click(true), None);
        assert!(host.is_open());
        assert!(host.overlay_click(false).is_some());
        assert!(!host.is_open());
    }

    #[test]
    fn test_reopen_keeps_original_focus() {
        let mut host = ModalHost::default();
        host.open(cert(), &desktop());
        let env = HostEnvironment {
            focused_element: Some("gf-modal".to_string()),
            ..desktop()
        };
        host.open(ModalContent::new("Other", "..."), &env);
        host.close();
        assert_eq!(host.restored_focus(), Some("cert-3"));
    }
}
