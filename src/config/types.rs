//! Configuration sections owned by the configuration layer
//!
//! Behavioural sections (follower, hover, tilt, tracker, intro, modal) live
//! next to the code they configure and are re-exported from [`super`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::contact::ServiceCredentials;

/// Contact form configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactConfig {
    /// Email delivery credentials
    #[serde(default)]
    pub credentials: ServiceCredentials,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files (None = console only)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: None,
        }
    }
}

impl LoggingConfig {
    /// Accepted level names
    pub const LEVELS: [&'static str; 5] = ["trace", "debug", "info", "warn", "error"];
}
