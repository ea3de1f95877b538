//! portfolio-motion - trace replay CLI
//!
//! Replays a recorded host trace through the cursor and section state
//! machines and prints one JSON line per frame.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_motion::config::{Config, LoggingConfig};
use portfolio_motion::replay::{replay, Trace};
use portfolio_motion::utils::{build_stamp, format_user_error};

/// Command-line arguments for portfolio-motion
#[derive(Parser, Debug)]
#[command(name = "portfolio-motion")]
#[command(version, about = "Portfolio interaction engine trace replayer", long_about = None)]
pub struct Args {
    /// Configuration file path (built-in defaults when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Trace file to replay (stdin when omitted)
    #[arg(short, long)]
    pub trace: Option<PathBuf>,

    /// Frame interval override in milliseconds
    ///
    /// Takes precedence over both the config file and the trace's own
    /// `frame_interval_ms`.
    #[arg(long, env = "PORTFOLIO_FRAME_INTERVAL_MS")]
    pub frame_interval_ms: Option<u64>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long, default_value = "pretty")]
    pub log_format: String,

    /// Write logs to file (in addition to stderr)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration before logging so its [logging] section applies
    let loaded = match &args.config {
        Some(path) => Config::load(path).map_err(|e| (path.clone(), e)),
        None => Ok(Config::default_config()),
    };
    let logging = loaded
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();

    init_logging(&args, &logging)?;

    info!("════════════════════════════════════════════════════════");
    info!("  portfolio-motion {}", build_stamp());
    info!("  Profile: {}", if cfg!(debug_assertions) { "debug" } else { "release" });
    info!("════════════════════════════════════════════════════════");

    let config = match loaded {
        Ok(config) => config,
        Err((path, e)) => {
            warn!("Failed to load config {}: {:#}, using defaults", path.display(), e);
            eprintln!("{}", format_user_error(&e));
            Config::default_config()
        }
    };

    // Override config with CLI args
    let config = config.with_overrides(args.frame_interval_ms);
    if let Err(e) = config.validate() {
        eprintln!("{}", format_user_error(&e));
        return Err(e);
    }
    debug!("Config: {:?}", config);

    if args.print_config {
        let toml = toml::to_string_pretty(&config).context("Failed to serialize config")?;
        print!("{}", toml);
        return Ok(());
    }

    if let Err(e) = run_replay(&args, &config) {
        eprintln!("{}", format_user_error(&e));
        return Err(e);
    }
    Ok(())
}

fn run_replay(args: &Args, config: &Config) -> Result<()> {
    let json = match &args.trace {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read trace file: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read trace from stdin")?;
            buf
        }
    };

    let mut trace = Trace::from_json(&json).context("Failed to load trace")?;
    trace.override_frame_interval(args.frame_interval_ms);
    let frames = replay(&trace, config).context("Failed to replay trace")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for frame in &frames {
        serde_json::to_writer(&mut out, frame).context("Failed to write frame")?;
        writeln!(out)?;
    }
    out.flush()?;

    info!("Replayed {} frames", frames.len());
    Ok(())
}

fn init_logging(args: &Args, logging: &LoggingConfig) -> Result<()> {
    let log_level = match args.verbose {
        0 => logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "portfolio_motion={level},warn",
            level = log_level
        ))
    });

    let log_file_path = args
        .log_file
        .clone()
        .or_else(|| logging.log_dir.as_ref().map(|dir| dir.join("portfolio-motion.log")));

    // Stdout carries frame output, so logs go to stderr
    if let Some(log_file_path) = &log_file_path {
        let file = File::create(log_file_path)
            .with_context(|| format!("Failed to create log file: {}", log_file_path.display()))?;

        match args.log_format.as_str() {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
            "compact" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_writer(io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
        }
        info!("Logging to file: {}", log_file_path.display());
    } else {
        match args.log_format.as_str() {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
                    .init();
            }
            "compact" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().compact().with_writer(io::stderr))
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().pretty().with_writer(io::stderr))
                    .init();
            }
        }
    }

    Ok(())
}
