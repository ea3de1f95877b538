//! Contact message form
//!
//! Client-side validation and submission of the "Send a Message" form.
//!
//! # Submission Flow
//!
//! ```text
//! submit()
//!   ├─> sanitize name/email/message (trim + HTML-escape)
//!   ├─> any field empty?         ──> error status, no send
//!   ├─> email malformed?         ──> error status, no send
//!   ├─> credentials unusable?    ──> error status, no send
//!   └─> loading = true ──> ContactService::send ──> loading = false
//!         ├─> Ok  ──> success status, fields cleared
//!         └─> Err ──> error status, fields kept
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::error::{ContactError, Result};
use super::service::{ContactService, EmailPayload, ServiceCredentials};

/// Success text shown after delivery
pub const SUCCESS_MESSAGE: &str = "Message sent.\nThank you! I'll get back to you soon.";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"));

/// Trim and escape `& < > "` so the text is safe to embed in HTML
pub fn sanitize(input: &str) -> String {
    let trimmed = input.trim();
    let mut out = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Loose address check: something@something.something, no whitespace
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Kind of feedback shown under the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// No feedback
    #[default]
    None,
    /// Delivery succeeded
    Success,
    /// Validation or delivery failed
    Error,
}

/// Feedback shown under the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormStatus {
    /// Feedback kind (also used as CSS class)
    pub kind: StatusKind,
    /// Feedback text
    pub text: String,
}

impl FormStatus {
    fn error(err: &ContactError) -> Self {
        Self {
            kind: StatusKind::Error,
            text: err.user_message(),
        }
    }

    fn success() -> Self {
        Self {
            kind: StatusKind::Success,
            text: SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// Message form state
#[derive(Debug, Clone, Default)]
pub struct MessageForm {
    /// Name input
    pub name: String,
    /// Email input
    pub email: String,
    /// Message textarea
    pub message: String,
    loading: bool,
    status: FormStatus,
}

impl MessageForm {
    /// Empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled with values
    pub fn with_values(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    /// Sanitize and validate the inputs into a delivery payload
    pub fn prepare(&self) -> Result<EmailPayload> {
        let name = sanitize(&self.name);
        let email = sanitize(&self.email);
        let message = sanitize(&self.message);

        if name.is_empty() {
            return Err(ContactError::MissingField("name"));
        }
        if email.is_empty() {
            return Err(ContactError::MissingField("email"));
        }
        if message.is_empty() {
            return Err(ContactError::MissingField("message"));
        }
        if !is_valid_email(&email) {
            return Err(ContactError::InvalidEmail(email));
        }

        Ok(EmailPayload {
            from_name: name,
            reply_to: email.clone(),
            from_email: email,
            message,
        })
    }

    /// Validate and deliver the message.
    ///
    /// The outcome is also recorded in [`status`](Self::status).
    pub async fn submit<S>(&mut self, service: &S, credentials: &ServiceCredentials) -> Result<()>
    where
        S: ContactService + ?Sized,
    {
        self.status = FormStatus::default();

        let outcome = self.deliver(service, credentials).await;
        match &outcome {
            Ok(()) => {
                info!("Contact message delivered");
                self.status = FormStatus::success();
                self.name.clear();
                self.email.clear();
                self.message.clear();
            }
            Err(e) if e.is_validation() => {
                debug!("Contact form rejected: {}", e);
                self.status = FormStatus::error(e);
            }
            Err(e) => {
                warn!("Contact message delivery failed: {}", e);
                self.status = FormStatus::error(e);
            }
        }
        outcome
    }

    async fn deliver<S>(&mut self, service: &S, credentials: &ServiceCredentials) -> Result<()>
    where
        S: ContactService + ?Sized,
    {
        let payload = self.prepare()?;
        credentials.ensure_configured()?;

        self.loading = true;
        let result = service.send(&payload).await;
        self.loading = false;
        result
    }

    /// A submission is in flight
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Submit button label
    pub fn button_label(&self) -> &'static str {
        if self.loading {
            "Sending…"
        } else {
            "Send Message"
        }
    }

    /// Current feedback
    pub fn status(&self) -> &FormStatus {
        &self.status
    }
}
