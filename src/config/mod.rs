//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - Environment variables (through the CLI layer)
//! - CLI arguments
//!
//! Every field has a serde default, so an empty file (or a file with only
//! the sections being tuned) is a valid configuration.
//!
//! ```toml
//! [follower]
//! lerp_factor = 0.35
//! frame_interval_ms = 16
//!
//! [tracker]
//! order = ["home", "about", "projects", "achievements", "connect"]
//!
//! [contact.credentials]
//! service_id = "service_abc"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub mod types;

pub use crate::cursor::{FollowerConfig, HoverConfig, TiltConfig};
pub use crate::intro::IntroConfig;
pub use crate::modal::ModalConfig;
pub use crate::sections::TrackerConfig;
pub use types::{ContactConfig, LoggingConfig};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Pointer follower tuning
    #[serde(default)]
    pub follower: FollowerConfig,
    /// Interactive element classification
    #[serde(default)]
    pub hover: HoverConfig,
    /// Hero card tilt gains
    #[serde(default)]
    pub tilt: TiltConfig,
    /// Section tracker order
    #[serde(default)]
    pub tracker: TrackerConfig,
    /// Intro sequence timing
    #[serde(default)]
    pub intro: IntroConfig,
    /// Modal host behaviour
    #[serde(default)]
    pub modal: ModalConfig,
    /// Contact form delivery
    #[serde(default)]
    pub contact: ContactConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let follower = &self.follower;

        if !(follower.lerp_factor > 0.0 && follower.lerp_factor <= 1.0) {
            anyhow::bail!(
                "lerp_factor ({}) must be in (0, 1]",
                follower.lerp_factor
            );
        }

        // A boosted factor above 1 would overshoot the target
        let boosted = follower.lerp_factor * follower.boost_multiplier;
        if follower.boost_multiplier <= 0.0 || boosted > 1.0 {
            anyhow::bail!(
                "boosted lerp factor ({} * {} = {}) must be in (0, 1]",
                follower.lerp_factor,
                follower.boost_multiplier,
                boosted
            );
        }

        if follower.boost_threshold_px < 0.0 {
            anyhow::bail!(
                "boost_threshold_px ({}) cannot be negative",
                follower.boost_threshold_px
            );
        }
        if follower.idle_window_ms == 0 {
            anyhow::bail!("idle_window_ms must be greater than zero");
        }
        if follower.frame_interval_ms == 0 {
            anyhow::bail!("frame_interval_ms must be greater than zero");
        }

        if self.tracker.order.is_empty() {
            anyhow::bail!("tracker.order must list at least one section");
        }
        let mut seen = HashSet::new();
        for id in &self.tracker.order {
            if !seen.insert(*id) {
                anyhow::bail!("tracker.order lists section '{}' more than once", id);
            }
        }

        if self.intro.title_hold_ms == 0 {
            anyhow::bail!("intro.title_hold_ms must be greater than zero");
        }

        if self.modal.mobile_breakpoint_px < 0.0 {
            anyhow::bail!(
                "modal.mobile_breakpoint_px ({}) cannot be negative",
                self.modal.mobile_breakpoint_px
            );
        }

        if !LoggingConfig::LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        Ok(())
    }

    /// Override config with CLI arguments
    pub fn with_overrides(mut self, frame_interval_ms: Option<u64>) -> Self {
        if let Some(interval) = frame_interval_ms {
            self.follower.frame_interval_ms = interval;
        }
        self
    }
}
