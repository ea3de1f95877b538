//! Contact section
//!
//! The contact form and the contact-card links. Email delivery is an
//! external service reached through the [`ContactService`] trait; this
//! module owns validation, sanitizing and user feedback only.

mod error;
mod form;
mod links;
mod service;

pub use error::{ContactError, Result};
pub use form::{is_valid_email, sanitize, FormStatus, MessageForm, StatusKind, SUCCESS_MESSAGE};
pub use links::{ConfirmationPrompt, ContactLink, LinkKind, OpenAction};
pub use service::{ContactService, EmailPayload, ServiceCredentials};
