//! Runtime Error Types

use thiserror::Error;

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Service lifecycle errors
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// `start()` called on a running service
    #[error("{0} is already running")]
    AlreadyRunning(&'static str),

    /// `stop()` called on a stopped service
    #[error("{0} is not running")]
    NotRunning(&'static str),

    /// The service task ended without handing its state back
    #[error("{0} task failed: {1}")]
    TaskFailed(&'static str, String),
}
