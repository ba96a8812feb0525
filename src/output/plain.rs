//! Plain text output formatting.
//!
//! The report itself is unstyled so it can be saved as-is; the status
//! helpers below add colors for the terminal.

use crate::scanner::ScanReport;
use crate::services::UNKNOWN_SERVICE;
use console::style;
use std::fmt::Write;

/// Longest banner excerpt shown, in characters.
pub const BANNER_EXCERPT_LEN: usize = 400;

/// Render a report as plain text.
pub fn text_report(report: &ScanReport) -> String {
    let header = format!("Scan report for {}", report.target);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{header}");
    let _ = writeln!(out, "{}", "=".repeat(header.chars().count()));
    out.push('\n');

    if report.open_ports.is_empty() {
        out.push_str("No open TCP ports detected (in requested set).");
        return out;
    }

    out.push_str("Open ports:");
    let mut ports = report.open_ports.clone();
    ports.sort_unstable();

    for port in ports {
        let info = report.services.get(&port);
        let service = info.map_or(UNKNOWN_SERVICE, |i| i.service.as_str());
        let _ = write!(out, "\n - {port}/tcp: {service}");

        if let Some(banner) = info.and_then(|i| i.banner.as_deref()).filter(|b| !b.is_empty()) {
            let _ = write!(out, "\n     banner: {}", banner_excerpt(banner));
        }
    }

    out
}

/// Escape line breaks and cap a banner at [`BANNER_EXCERPT_LEN`] characters.
pub fn banner_excerpt(banner: &str) -> String {
    let escaped = banner.replace('\r', "\\r").replace('\n', "\\n");

    match escaped.char_indices().nth(BANNER_EXCERPT_LEN) {
        Some((cut, _)) => format!("{}...", &escaped[..cut]),
        None => escaped,
    }
}

/// Print the line announcing a scan.
pub fn print_scan_header(target: &str, ports: usize, timeout_secs: f64) {
    println!(
        "{} {} on {} ports (timeout={}s)",
        style("Scanning").cyan(),
        style(target).white().bold(),
        style(ports).white().bold(),
        timeout_secs
    );
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{ServiceInfo, ServiceMap};
    use crate::types::Port;

    fn port(p: u16) -> Port {
        Port::new(p).unwrap()
    }

    fn sample_report() -> ScanReport {
        let mut services = ServiceMap::new();
        services.insert(
            port(22),
            ServiceInfo::new("SSH", Some("SSH-2.0-OpenSSH_7.4".into())),
        );
        services.insert(port(80), ServiceInfo::new("HTTP", None));
        ScanReport::new("example.com", vec![port(22), port(80)], services)
    }

    #[test]
    fn test_text_report() {
        let text = text_report(&sample_report());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Scan report for example.com");
        assert_eq!(lines[1], "=".repeat(lines[0].len()));
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "Open ports:");
        assert_eq!(lines[4], " - 22/tcp: SSH");
        assert_eq!(lines[5], "     banner: SSH-2.0-OpenSSH_7.4");
        assert_eq!(lines[6], " - 80/tcp: HTTP");
        assert_eq!(lines.len(), 7);
        assert_eq!(text.matches("banner:").count(), 1);
    }

    #[test]
    fn test_text_report_without_open_ports() {
        let report = ScanReport::new("10.0.0.1", Vec::new(), ServiceMap::new());
        let text = text_report(&report);

        assert!(text.starts_with("Scan report for 10.0.0.1\n"));
        assert!(text.ends_with("\n\nNo open TCP ports detected (in requested set)."));
        assert!(!text.contains("Open ports:"));
    }

    #[test]
    fn test_port_without_service_record_is_unknown() {
        let report = ScanReport::new("h", vec![port(31337)], ServiceMap::new());
        assert!(text_report(&report).contains(" - 31337/tcp: unknown"));
    }

    #[test]
    fn test_banner_line_breaks_are_escaped() {
        assert_eq!(banner_excerpt("220 hi\r\n250 ok"), "220 hi\\r\\n250 ok");
    }

    #[test]
    fn test_long_banner_is_truncated() {
        let long = "A".repeat(500);
        let excerpt = banner_excerpt(&long);

        assert_eq!(excerpt.len(), BANNER_EXCERPT_LEN + 3);
        assert!(excerpt.ends_with("..."));

        let exact = "B".repeat(BANNER_EXCERPT_LEN);
        assert_eq!(banner_excerpt(&exact), exact);
    }

    #[test]
    fn test_truncation_counts_characters() {
        let wide = "é".repeat(450);
        let excerpt = banner_excerpt(&wide);
        assert_eq!(excerpt.chars().count(), BANNER_EXCERPT_LEN + 3);
    }

    #[test]
    fn test_truncation_applies_after_escaping() {
        let banner = format!("{}\n", "x".repeat(399));
        let excerpt = banner_excerpt(&banner);
        assert_eq!(excerpt, format!("{}\\...", "x".repeat(399)));
    }
}
