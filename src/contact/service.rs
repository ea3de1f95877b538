//! Email delivery contract
//!
//! Delivery itself is an opaque remote service; this crate only defines
//! what it is handed and how its outcome is reported.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::{ContactError, Result};

/// Placeholder values shipped in example configuration
const PLACEHOLDERS: [&str; 3] = ["YOUR_SERVICE_ID", "YOUR_TEMPLATE_ID", "YOUR_PUBLIC_KEY"];

/// Template parameters sent to the delivery service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailPayload {
    /// Sender name
    pub from_name: String,
    /// Sender address
    pub from_email: String,
    /// Message body
    pub message: String,
    /// Reply-to address (same as sender)
    pub reply_to: String,
}

/// Remote email delivery
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Deliver one message
    async fn send(&self, payload: &EmailPayload) -> Result<()>;
}

/// Delivery service credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceCredentials {
    /// Service identifier
    #[serde(default)]
    pub service_id: Option<String>,

    /// Template identifier
    #[serde(default)]
    pub template_id: Option<String>,

    /// Public API key
    #[serde(default)]
    pub public_key: Option<String>,
}

impl ServiceCredentials {
    /// Fully specified credentials
    pub fn new(
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            service_id: Some(service_id.into()),
            template_id: Some(template_id.into()),
            public_key: Some(public_key.into()),
        }
    }

    /// Check every credential is present and not a placeholder
    pub fn ensure_configured(&self) -> Result<()> {
        let fields = [
            ("service_id", &self.service_id),
            ("template_id", &self.template_id),
            ("public_key", &self.public_key),
        ];

        for (name, value) in fields {
            match value.as_deref().map(str::trim) {
                None | Some("") => {
                    return Err(ContactError::NotConfigured(format!("{} is missing", name)))
                }
                Some(v) if PLACEHOLDERS.contains(&v) => {
                    return Err(ContactError::NotConfigured(format!(
                        "{} is still a placeholder",
                        name
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Whether [`ensure_configured`](Self::ensure_configured) passes
    pub fn is_configured(&self) -> bool {
        self.ensure_configured().is_ok()
    }
}
