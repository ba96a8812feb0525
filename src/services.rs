//! Service detection based on well-known port numbers.
//!
//! Provides mapping from port numbers to likely service names.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Name reported for ports missing from the table.
pub const UNKNOWN_SERVICE: &str = "unknown";

/// Static map of well-known ports to service names.
static PORT_SERVICES: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (20, "FTP-data"),
        (21, "FTP"),
        (22, "SSH"),
        (23, "Telnet"),
        (25, "SMTP"),
        (53, "DNS"),
        (67, "DHCP"),
        (68, "DHCP"),
        (80, "HTTP"),
        (110, "POP3"),
        (111, "rpcbind"),
        (119, "NNTP"),
        (123, "NTP"),
        (143, "IMAP"),
        (161, "SNMP"),
        (194, "IRC"),
        (443, "HTTPS"),
        (445, "Microsoft-DS"),
        (465, "SMTPS"),
        (514, "syslog"),
        (587, "SMTP-submission"),
        (631, "IPP"),
        (993, "IMAPS"),
        (995, "POP3S"),
        (3306, "MySQL"),
        (3389, "RDP"),
        (5900, "VNC"),
        (8080, "HTTP-alt"),
    ])
});

/// Look up the probable service name for a given port.
///
/// Returns `None` if the port is not in the well-known services table.
pub fn get_service_name(port: u16) -> Option<&'static str> {
    PORT_SERVICES.get(&port).copied()
}

/// Get the service label for a port, "unknown" if it is not recognized.
pub fn get_service_description(port: u16) -> &'static str {
    get_service_name(port).unwrap_or(UNKNOWN_SERVICE)
}
