//! Contact Error Types

use thiserror::Error;

/// Result type for contact operations
pub type Result<T> = std::result::Result<T, ContactError>;

/// Contact form and delivery errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// A required field is empty after sanitizing
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Email address failed validation
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// Delivery credentials absent or left at placeholder values
    #[error("Email service not configured: {0}")]
    NotConfigured(String),

    /// The delivery service rejected the message
    #[error("Delivery rejected (status {status:?}): {text:?}")]
    Rejected {
        /// Service status code, if reported
        status: Option<u16>,
        /// Service error text, if reported
        text: Option<String>,
    },

    /// The delivery service could not be reached
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ContactError {
    /// Message shown in the form's feedback area
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingField(_) => "Please complete all required fields.".to_string(),
            Self::InvalidEmail(_) => "Please enter a valid email address.".to_string(),
            Self::NotConfigured(_) => {
                "Email service not configured. Please check the contact settings and restart."
                    .to_string()
            }
            Self::Rejected {
                text: Some(text), ..
            } if !text.is_empty() => format!("Failed to send message. {}", text),
            Self::Rejected {
                status: Some(status),
                ..
            } => format!("Failed to send message. Error code: {}", status),
            Self::Rejected { .. } | Self::Transport(_) => {
                "Failed to send message. Please check your email service configuration and try again."
                    .to_string()
            }
        }
    }

    /// Whether the user can fix this by editing the form
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField(_) | Self::InvalidEmail(_))
    }
}
