//! Port prober: bounded-concurrency reachability checks.
//!
//! Probes run as independent tokio tasks. A task is only spawned when the
//! stream buffer has room, so the number of live sockets never exceeds the
//! configured concurrency no matter how many ports are asked for. Results
//! arrive in completion order and are sorted once at the end.

use crate::scanner::rate_limiter::RateLimiter;
use crate::scanner::tcp::TcpConnectProbe;
use crate::scanner::traits::PortProbe;
use crate::types::{Port, Target};
use futures::future;
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinError;
use tracing::{debug, warn};

/// Default number of probes in flight.
pub const DEFAULT_CONCURRENCY: usize = 50;

/// Tuning for a probe run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Maximum probes in flight; values below 1 are treated as 1.
    pub concurrency: usize,
    /// Probes started per second, 0 for unlimited.
    pub rate_limit: u32,
}

impl ProbeOptions {
    /// Options with the given concurrency and no rate cap.
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency,
            rate_limit: 0,
        }
    }

    /// Cap the number of probes started per second.
    pub fn with_rate_limit(mut self, rate: u32) -> Self {
        self.rate_limit = rate;
        self
    }
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY)
    }
}

/// Find the open TCP ports on `target`.
///
/// Returns the open ports in ascending order. A target that does not
/// resolve yields no open ports.
pub async fn probe(
    target: &Target,
    ports: &[Port],
    timeout: Duration,
    concurrency: usize,
) -> Vec<Port> {
    probe_with_options(target, ports, timeout, ProbeOptions::new(concurrency), None).await
}

/// [`probe`] with rate limiting and optional progress reporting.
pub async fn probe_with_options(
    target: &Target,
    ports: &[Port],
    timeout: Duration,
    options: ProbeOptions,
    progress: Option<&ProgressBar>,
) -> Vec<Port> {
    let ip = match target.resolve().await {
        Ok(ip) => ip,
        Err(e) => {
            warn!(host = %target, error = %e, "target did not resolve, no port can be reached");
            if let Some(pb) = progress {
                pb.inc(ports.len() as u64);
            }
            return Vec::new();
        }
    };

    debug!(host = %target, %ip, ports = ports.len(), "probing");
    let probe = Arc::new(TcpConnectProbe::new(ip, timeout));
    run_probes(probe, ports.iter().copied(), options, progress).await
}

/// Drive `probe` over a set of ports with bounded concurrency.
///
/// Duplicate ports are checked once. A probe task that panics counts as
/// not open; it never takes the rest of the batch down with it.
pub async fn run_probes<P>(
    probe: Arc<P>,
    ports: impl IntoIterator<Item = Port>,
    options: ProbeOptions,
    progress: Option<&ProgressBar>,
) -> Vec<Port>
where
    P: PortProbe + 'static,
{
    let working_set: BTreeSet<Port> = ports.into_iter().collect();
    let limiter = RateLimiter::new(options.rate_limit);
    let mut open = Vec::new();

    stream::iter(working_set)
        .map(|port| {
            let probe = Arc::clone(&probe);
            let limiter = limiter.clone();

            async move {
                if let Some(limiter) = limiter {
                    limiter.wait().await;
                }
                // Spawned so a panic surfaces as a JoinError instead of unwinding the scan.
                tokio::spawn(async move { (port, probe.check_port(port).await) }).await
            }
        })
        .buffer_unordered(options.concurrency.max(1))
        .for_each(|joined| {
            record(joined, &mut open, progress);
            future::ready(())
        })
        .await;

    open.sort_unstable();
    open
}

fn record(
    joined: Result<(Port, bool), JoinError>,
    open: &mut Vec<Port>,
    progress: Option<&ProgressBar>,
) {
    match joined {
        Ok((port, true)) => {
            debug!(%port, "open");
            open.push(port);
            if let Some(pb) = progress {
                pb.set_message(format!("found open port: {port}"));
            }
        }
        Ok((_, false)) => {}
        Err(e) => warn!(error = %e, "probe task failed, counted as not open"),
    }

    if let Some(pb) = progress {
        pb.inc(1);
    }
}
