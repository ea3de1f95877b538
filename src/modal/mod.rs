//! Modal dialogs
//!
//! Hosts the document viewer (certificates, project write-ups) with scroll
//! locking, focus trapping and dismissal handling.

mod host;

pub use host::{
    CloseEffects, HostEnvironment, KeyOutcome, ModalConfig, ModalContent, ModalHost, ModalKey,
    ScrollLock,
};
