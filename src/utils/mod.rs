//! Utility Functions
//!
//! ## Error Formatting
//!
//! The [`errors`] module turns an `anyhow::Error` into a boxed message with
//! troubleshooting hints:
//!
//! ```rust,no_run
//! use portfolio_motion::utils::format_user_error;
//!
//! # fn run() -> anyhow::Result<()> { Ok(()) }
//! if let Err(e) = run() {
//!     eprintln!("{}", format_user_error(&e));
//! }
//! ```
//!
//! Error categories with context-aware help:
//! - Trace errors → JSON shape, event ordering, frame interval
//! - Config file errors → path, TOML syntax, value types
//! - Validation errors → allowed ranges for each tunable

pub mod build_info;
pub mod errors;

pub use build_info::build_stamp;
pub use errors::format_user_error;
