//! Scan command implementation.
//!
//! Merges flags with the settings file, runs the scan, prints the text
//! report and optionally saves it.

use super::Cli;
use crate::config::AppSettings;
use crate::output::{self, ReportFormat};
use crate::scanner::{run_scan, ScanConfig};
use crate::types::{PortSpec, Target};
use anyhow::Context;
use std::time::Duration;
use tracing::debug;

impl Cli {
    /// Execute the scan described by the parsed arguments.
    ///
    /// Scan outcomes never fail this call; only local problems such as an
    /// unreadable settings file or an unwritable output path do.
    pub async fn execute(&self) -> anyhow::Result<()> {
        let settings = self.load_settings()?;

        let timeout = match self.timeout {
            Some(timeout) => timeout,
            None => Duration::try_from_secs_f64(settings.timeout_secs).with_context(|| {
                format!("invalid timeout_secs {} in settings", settings.timeout_secs)
            })?,
        };
        let concurrency = self.concurrency.unwrap_or(settings.concurrency);
        let rate_limit = self.rate_limit.unwrap_or(settings.rate_limit);

        let spec = PortSpec::from_user_input(self.ports.as_deref());
        let ports = spec.to_ports();
        debug!(%spec, ports = ports.len(), concurrency, rate_limit, ?timeout, "scan parameters");

        if !self.quiet {
            output::print_scan_header(&self.target, ports.len(), timeout.as_secs_f64());
        }

        let mut config = ScanConfig::new(Target::new(self.target.as_str()), ports)
            .with_timeout(timeout)
            .with_concurrency(concurrency)
            .with_rate_limit(rate_limit);
        if self.verbose {
            config = config.with_progress();
        }

        let report = run_scan(&config).await;
        println!("{}", output::text_report(&report));

        if let Some(path) = &self.output {
            let format = self
                .format
                .or(settings.format)
                .unwrap_or_else(|| ReportFormat::infer(path));
            let content = output::render(&report, format)?;
            output::save_report(path, &content)?;

            if !self.quiet {
                output::print_success(&format!("Report saved to {}", path.display()));
            }
        }

        Ok(())
    }

    fn load_settings(&self) -> anyhow::Result<AppSettings> {
        match &self.config {
            Some(path) => AppSettings::load_from(path)
                .with_context(|| format!("loading settings from {}", path.display())),
            None => Ok(AppSettings::load().unwrap_or_else(|e| {
                output::print_warning(&format!("ignoring settings file: {e}"));
                AppSettings::default()
            })),
        }
    }
}
