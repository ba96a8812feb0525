//! # portaudit - quick TCP reconnaissance of a single host
//!
//! portaudit finds the open TCP ports on one target, names the likely
//! service on each and captures whatever banner the service offers.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portaudit::scanner::{identify, probe};
//! use portaudit::types::{PortSpec, Target};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let target = Target::new("192.168.1.1");
//!     let ports = PortSpec::parse("22,80,443").to_ports();
//!     let timeout = Duration::from_millis(500);
//!
//!     let open = probe(&target, &ports, timeout, 50).await;
//!     for (port, info) in identify(&target, &open, timeout).await {
//!         println!("{port}/tcp {} {:?}", info.service, info.banner);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Ports, port specifications and targets
//! - [`scanner`] - The port prober and the service identifier
//! - [`banner`] - Banner capture with protocol-specific probes
//! - [`services`] - Static port-to-service table
//! - [`output`] - Text and JSON reports
//! - [`config`] - Settings file handling
//! - [`cli`] - Command-line front end
//! - [`error`] - Error types

pub mod banner;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{ConfigError, ReportError, ScanError};
pub use scanner::{identify, probe, run_scan, ScanConfig, ScanReport, ServiceInfo};
pub use types::{Port, PortSpec, Target};
