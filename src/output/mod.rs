//! Output formatting module.
//!
//! Renders a [`ScanReport`] as plain text or JSON and saves rendered
//! reports to disk.

mod json_format;
mod plain;

pub use json_format::json_report;
pub use plain::{
    banner_excerpt, print_scan_header, print_success, print_warning, text_report,
    BANNER_EXCERPT_LEN,
};

use crate::error::{ReportError, ReportResult};
use crate::scanner::ScanReport;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable plain text
    #[default]
    #[value(name = "txt")]
    #[serde(rename = "txt")]
    Text,
    /// JSON structured output
    Json,
}

impl ReportFormat {
    /// Pick a format from a file name: `.json` means JSON, anything else text.
    pub fn infer(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }

    /// Use `explicit` when given, otherwise infer from `path`.
    pub fn resolve(explicit: Option<Self>, path: &Path) -> Self {
        explicit.unwrap_or_else(|| Self::infer(path))
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "txt"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Render a report in the requested format.
pub fn render(report: &ScanReport, format: ReportFormat) -> ReportResult<String> {
    match format {
        ReportFormat::Text => Ok(text_report(report)),
        ReportFormat::Json => Ok(json_report(report)?),
    }
}

/// Write rendered report content to `path`.
pub fn save_report(path: &Path, content: &str) -> ReportResult<()> {
    fs::write(path, content).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{ServiceInfo, ServiceMap};
    use crate::types::Port;

    #[test]
    fn test_infer_format() {
        assert_eq!(ReportFormat::infer(Path::new("out.json")), ReportFormat::Json);
        assert_eq!(ReportFormat::infer(Path::new("OUT.JSON")), ReportFormat::Json);
        assert_eq!(ReportFormat::infer(Path::new("out.txt")), ReportFormat::Text);
        assert_eq!(ReportFormat::infer(Path::new("report")), ReportFormat::Text);
        assert_eq!(ReportFormat::infer(Path::new("json")), ReportFormat::Text);
    }

    #[test]
    fn test_explicit_format_wins() {
        let path = Path::new("scan.json");
        assert_eq!(
            ReportFormat::resolve(Some(ReportFormat::Text), path),
            ReportFormat::Text
        );
        assert_eq!(ReportFormat::resolve(None, path), ReportFormat::Json);
    }

    #[test]
    fn test_save_report_round_trip() {
        let port = Port::new(8080).unwrap();
        let mut services = ServiceMap::new();
        services.insert(port, ServiceInfo::new("HTTP-alt", None));
        let report = ScanReport::new("127.0.0.1", vec![port], services);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.json");
        let content = render(&report, ReportFormat::infer(&path)).unwrap();
        save_report(&path, &content).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["open_ports"], serde_json::json!([8080]));
    }

    #[test]
    fn test_save_report_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("scan.txt");

        let err = save_report(&path, "x").unwrap_err();
        assert!(matches!(err, ReportError::Write { .. }));
    }
}
