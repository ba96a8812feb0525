//! Scanner module - the probing engine and service identification.
//!
//! A scan runs in two phases: the prober finds the open ports with bounded
//! concurrency, then the identifier visits each open port to name its
//! service and capture a banner.

pub mod identify;
pub mod prober;
pub mod rate_limiter;
pub mod tcp;
pub mod traits;

use crate::types::{Port, Target};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};
use tracing::info;

pub use identify::{identify, ServiceInfo, ServiceMap};
pub use prober::{probe, probe_with_options, run_probes, ProbeOptions, DEFAULT_CONCURRENCY};
pub use rate_limiter::RateLimiter;
pub use tcp::TcpConnectProbe;
pub use traits::PortProbe;

/// Default per-operation timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);

/// Combined result of a scan, ready for reporting.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Target as the user wrote it.
    pub target: String,
    /// Open ports, ascending.
    pub open_ports: Vec<Port>,
    /// Service record for each open port.
    pub services: ServiceMap,
}

impl ScanReport {
    /// Create a new report.
    pub fn new(target: impl Into<String>, open_ports: Vec<Port>, services: ServiceMap) -> Self {
        Self {
            target: target.into(),
            open_ports,
            services,
        }
    }
}

/// Configuration for a scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub target: Target,
    pub ports: Vec<Port>,
    pub timeout: Duration,
    pub options: ProbeOptions,
    pub show_progress: bool,
}

impl ScanConfig {
    /// Create a scan of `ports` on `target` with default tuning.
    pub fn new(target: Target, ports: Vec<Port>) -> Self {
        Self {
            target,
            ports,
            timeout: DEFAULT_TIMEOUT,
            options: ProbeOptions::default(),
            show_progress: false,
        }
    }

    /// Set the per-operation timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of probes in flight.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.options.concurrency = concurrency;
        self
    }

    /// Cap probes per second (0 = unlimited).
    pub fn with_rate_limit(mut self, rate: u32) -> Self {
        self.options.rate_limit = rate;
        self
    }

    /// Show a progress bar while probing.
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }
}

/// Execute a complete scan: probe, then identify.
pub async fn run_scan(config: &ScanConfig) -> ScanReport {
    let start_time = Instant::now();

    let progress = config.show_progress.then(|| {
        let pb = ProgressBar::new(config.ports.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        ) {
            pb.set_style(style.progress_chars("=>-"));
        }
        pb
    });

    let open_ports = probe_with_options(
        &config.target,
        &config.ports,
        config.timeout,
        config.options,
        progress.as_ref(),
    )
    .await;

    if let Some(pb) = progress {
        pb.finish_with_message("probing complete");
    }
    info!(
        host = %config.target,
        open = open_ports.len(),
        probed = config.ports.len(),
        "probe phase finished"
    );

    let services = identify(&config.target, &open_ports, config.timeout).await;
    info!(
        host = %config.target,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "scan finished"
    );

    ScanReport::new(config.target.host(), open_ports, services)
}
