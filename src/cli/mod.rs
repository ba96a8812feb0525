//! Command-line interface definitions for portaudit.
//!
//! Uses `clap` derive macros for declarative argument parsing. Most
//! options can also come from `PORTAUDIT_*` environment variables or the
//! settings file.

mod scan;

use crate::output::ReportFormat;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Quick TCP reconnaissance of a single host.
///
/// Finds the open TCP ports on the target, names the likely service on
/// each and captures whatever banner the service offers.
#[derive(Parser, Debug)]
#[command(name = "portaudit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Simple network audit scanner", long_about = None)]
pub struct Cli {
    /// Target IP address or hostname
    #[arg(short, long, env = "PORTAUDIT_TARGET")]
    pub target: String,

    /// Comma-separated ports and ranges, e.g. "22,80,8000-8010" [default: 1-100]
    #[arg(short, long, env = "PORTAUDIT_PORTS")]
    pub ports: Option<String>,

    /// Socket timeout in seconds for each network operation [default: 0.5]
    #[arg(long, value_name = "SECONDS", value_parser = parse_timeout, env = "PORTAUDIT_TIMEOUT")]
    pub timeout: Option<Duration>,

    /// Path to save the report to
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Format of the saved report; inferred from the file extension if omitted
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Maximum number of concurrent probes [default: 50]
    #[arg(short, long, env = "PORTAUDIT_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Maximum probes started per second (0 = unlimited)
    #[arg(long = "rate", value_name = "PER_SEC", env = "PORTAUDIT_RATE")]
    pub rate_limit: Option<u32>,

    /// Verbose output (debug logging and a progress bar)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress status messages; the report is still printed
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to a settings file
    #[arg(long, value_name = "PATH", env = "PORTAUDIT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Parse a timeout given in (possibly fractional) seconds.
fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number of seconds: {s}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid timeout {s}: {e}"))
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `-v` enables debug output for
/// this crate and `-q` limits logging to errors.
pub fn init_logging(verbose: bool, quiet: bool) {
    let default_directive = if verbose {
        "portaudit=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
