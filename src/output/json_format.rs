//! JSON output formatting.

use crate::scanner::{ScanReport, ServiceInfo};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
struct JsonReport<'a> {
    target: &'a str,
    open_ports: Vec<u16>,
    /// Keyed by port number; serde_json writes integer keys as strings.
    services: BTreeMap<u16, &'a ServiceInfo>,
}

/// Render a report as pretty-printed JSON.
pub fn json_report(report: &ScanReport) -> serde_json::Result<String> {
    let mut open_ports: Vec<u16> = report.open_ports.iter().map(|p| p.as_u16()).collect();
    open_ports.sort_unstable();

    let payload = JsonReport {
        target: &report.target,
        open_ports,
        services: report
            .services
            .iter()
            .map(|(port, info)| (port.as_u16(), info))
            .collect(),
    };

    serde_json::to_string_pretty(&payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ServiceMap;
    use crate::types::Port;
    use serde_json::Value;

    #[test]
    fn test_json_report_shape() {
        let port = Port::new(8080).unwrap();
        let mut services = ServiceMap::new();
        services.insert(port, ServiceInfo::new("HTTP-alt", Some("GET /".into())));
        let report = ScanReport::new("127.0.0.1", vec![port], services);

        let parsed: Value = serde_json::from_str(&json_report(&report).unwrap()).unwrap();
        assert_eq!(parsed["target"], "127.0.0.1");
        assert_eq!(parsed["open_ports"], serde_json::json!([8080]));
        assert_eq!(parsed["services"]["8080"]["service"], "HTTP-alt");
        assert_eq!(parsed["services"]["8080"]["banner"], "GET /");
    }

    #[test]
    fn test_missing_banner_is_null() {
        let port = Port::new(80).unwrap();
        let mut services = ServiceMap::new();
        services.insert(port, ServiceInfo::new("HTTP", None));
        let report = ScanReport::new("example.com", vec![port], services);

        let parsed: Value = serde_json::from_str(&json_report(&report).unwrap()).unwrap();
        let entry = parsed["services"]["80"].as_object().unwrap();
        assert!(entry.contains_key("banner"));
        assert!(entry["banner"].is_null());
    }

    #[test]
    fn test_empty_report() {
        let report = ScanReport::new("10.0.0.9", Vec::new(), ServiceMap::new());
        let parsed: Value = serde_json::from_str(&json_report(&report).unwrap()).unwrap();

        assert_eq!(parsed["open_ports"], serde_json::json!([]));
        assert_eq!(parsed["services"], serde_json::json!({}));
    }
}
