//! User-Friendly Error Formatting
//!
//! Provides user-friendly error messages with troubleshooting hints
//! for common error scenarios.

use std::fmt::Write;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Format error for user consumption
///
/// Takes technical error and produces user-friendly message with
/// troubleshooting steps and context.
pub fn format_user_error(error: &anyhow::Error) -> String {
    let mut output = String::new();

    // Header
    writeln!(&mut output).ok();
    writeln!(
        &mut output,
        "╔════════════════════════════════════════════════════════════╗"
    )
    .ok();
    writeln!(
        &mut output,
        "║                     ERROR                                  ║"
    )
    .ok();
    writeln!(
        &mut output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();
    writeln!(&mut output).ok();

    // Match against the whole context chain, not just the outermost message
    let chain = format!("{:#}", error);

    if chain.contains("trace") || chain.contains("Event ") {
        format_trace_error(&mut output);
    } else if chain.contains("Failed to read config") {
        format_config_missing_error(&mut output);
    } else if chain.contains("Failed to parse config") {
        format_config_syntax_error(&mut output);
    } else if is_validation_error(&chain) {
        format_validation_error(&mut output, &chain);
    } else {
        format_generic_error(&mut output, &error.to_string());
    }

    // Technical details
    writeln!(&mut output).ok();
    writeln!(&mut output, "{}", RULE).ok();
    writeln!(&mut output, "Technical Details:").ok();
    writeln!(&mut output).ok();
    writeln!(&mut output, "{}", chain).ok();
    writeln!(&mut output).ok();

    // Footer with help
    writeln!(&mut output, "{}", RULE).ok();
    writeln!(&mut output, "Need Help?").ok();
    writeln!(
        &mut output,
        "  - Run with --verbose for detailed logs: portfolio-motion -vv"
    )
    .ok();
    writeln!(
        &mut output,
        "  - Print the effective configuration: portfolio-motion --print-config"
    )
    .ok();
    writeln!(
        &mut output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();

    output
}

fn is_validation_error(chain: &str) -> bool {
    ["lerp", "idle_window", "frame_interval", "tracker.order", "intro.", "modal.", "log level"]
        .iter()
        .any(|needle| chain.contains(needle))
}

fn format_trace_error(output: &mut String) {
    writeln!(output, "Trace Error").ok();
    writeln!(output).ok();
    writeln!(output, "The event trace could not be replayed.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. File is not valid trace JSON").ok();
    writeln!(output, "     → Top level needs 'viewport_height' and 'events'").ok();
    writeln!(
        output,
        "     → Each event needs 'at_ms' and a 'type' (move, over, out, scroll, hide, show,"
    )
    .ok();
    writeln!(
        output,
        "       tilt_move, tilt_leave, modal_open, modal_key, overlay_click)"
    )
    .ok();
    writeln!(output).ok();
    writeln!(output, "  2. Events out of order").ok();
    writeln!(output, "     → Sort events by 'at_ms' before replaying").ok();
    writeln!(output).ok();
    writeln!(output, "  3. Frame interval of zero").ok();
    writeln!(
        output,
        "     → Remove 'frame_interval_ms' from the trace or set it above 0"
    )
    .ok();
    writeln!(output).ok();
    writeln!(output, "  4. Replay too long").ok();
    writeln!(
        output,
        "     → Lower 'duration_ms', check 'at_ms' values, or raise --frame-interval-ms"
    )
    .ok();
}

fn format_config_missing_error(output: &mut String) {
    writeln!(output, "Configuration File Not Found").ok();
    writeln!(output).ok();
    writeln!(output, "Could not read the configuration file.").ok();
    writeln!(output).ok();
    writeln!(output, "  → Check the path passed to --config").ok();
    writeln!(
        output,
        "  → Omit --config to run with built-in defaults"
    )
    .ok();
    writeln!(
        output,
        "  → Generate a starting point: portfolio-motion --print-config > motion.toml"
    )
    .ok();
}

fn format_config_syntax_error(output: &mut String) {
    writeln!(output, "Configuration Syntax Error").ok();
    writeln!(output).ok();
    writeln!(output, "The configuration file is not valid TOML for this tool.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Invalid TOML syntax").ok();
    writeln!(output, "     → Check for typos, missing quotes, etc.").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Wrong value type").ok();
    writeln!(output, "     → Durations are whole milliseconds (idle_window_ms = 1000)").ok();
    writeln!(
        output,
        "     → Section names are lowercase (order = [\"home\", \"about\"])"
    )
    .ok();
}

fn format_validation_error(output: &mut String, chain: &str) {
    writeln!(output, "Invalid Configuration Value").ok();
    writeln!(output).ok();
    writeln!(output, "{}", chain).ok();
    writeln!(output).ok();
    writeln!(output, "Allowed Ranges:").ok();
    writeln!(output).ok();
    writeln!(
        output,
        "  → follower.lerp_factor in (0, 1], and lerp_factor * boost_multiplier <= 1"
    )
    .ok();
    writeln!(output, "  → follower.idle_window_ms and frame_interval_ms above 0").ok();
    writeln!(output, "  → tracker.order non-empty with no repeated section").ok();
    writeln!(output, "  → intro.title_hold_ms above 0").ok();
}

fn format_generic_error(output: &mut String, error: &str) {
    writeln!(output, "Error").ok();
    writeln!(output).ok();
    writeln!(output, "Error: {}", error).ok();
    writeln!(output).ok();
    writeln!(output, "Troubleshooting:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Re-run with -vv to see state transitions").ok();
    writeln!(output, "  2. Check the configuration with --print-config").ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_format_user_error() {
        let error = anyhow::anyhow!("something unexpected");
        let formatted = format_user_error(&error);
        assert!(formatted.contains("ERROR"));
        assert!(formatted.contains("something unexpected"));
    }

    #[test]
    fn test_missing_config_hint() {
        let error = std::fs::read_to_string("/nonexistent/motion.toml")
            .context("Failed to read config file: /nonexistent/motion.toml")
            .unwrap_err();
        let formatted = format_user_error(&error);
        assert!(formatted.contains("Configuration File Not Found"));
        assert!(formatted.contains("--print-config"));
    }

    #[test]
    fn test_validation_hint() {
        let error = anyhow::anyhow!("lerp_factor (0) must be in (0, 1]");
        let formatted = format_user_error(&error);
        assert!(formatted.contains("Invalid Configuration Value"));
    }

    #[test]
    fn test_oversized_replay_hint() {
        let error = anyhow::Error::new(crate::replay::ReplayError::TooManyFrames {
            duration_ms: u64::MAX,
            interval_ms: 1,
            max: crate::replay::MAX_REPLAY_FRAMES,
        })
        .context("Failed to replay trace");
        let formatted = format_user_error(&error);
        assert!(formatted.contains("Replay too long"));
        assert!(formatted.contains("exceeds 1000000 frames"));
    }

    #[test]
    fn test_trace_hint() {
        let error = anyhow::anyhow!("missing field `viewport_height`").context("Failed to load trace");
        let formatted = format_user_error(&error);
        assert!(formatted.contains("Trace Error"));
    }
}
