//! Service identification for ports already known to be open.
//!
//! Each port gets its own fresh connection for banner capture, one port at
//! a time. The service name comes from the static table and never depends
//! on whether the capture worked.

use crate::banner::grab_banner;
use crate::services::get_service_description;
use crate::types::{Port, Target};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, warn};

/// What is known about the service on one port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    /// Best-guess service name, "unknown" when the port is not in the table.
    pub service: String,
    /// Text the service sent, if any was captured.
    pub banner: Option<String>,
}

impl ServiceInfo {
    /// Create a new service record.
    pub fn new(service: impl Into<String>, banner: Option<String>) -> Self {
        Self {
            service: service.into(),
            banner,
        }
    }
}

/// Per-port service records in ascending port order.
pub type ServiceMap = BTreeMap<Port, ServiceInfo>;

/// Identify the services behind `open_ports`.
///
/// The returned map has an entry for every port passed in. Any failure
/// while capturing a banner leaves that port's banner empty and moves on.
pub async fn identify(target: &Target, open_ports: &[Port], timeout: Duration) -> ServiceMap {
    let mut services = ServiceMap::new();
    if open_ports.is_empty() {
        return services;
    }

    let ip = match target.resolve().await {
        Ok(ip) => Some(ip),
        Err(e) => {
            warn!(host = %target, error = %e, "target did not resolve, skipping banner capture");
            None
        }
    };

    let ports: BTreeSet<Port> = open_ports.iter().copied().collect();
    for port in ports {
        let banner = match ip {
            Some(ip) => {
                let addr = SocketAddr::new(ip, port.as_u16());
                grab_banner(addr, target.host(), timeout).await
            }
            None => None,
        };

        let service = get_service_description(port.as_u16());
        debug!(%port, service, has_banner = banner.is_some(), "identified");
        services.insert(port, ServiceInfo::new(service, banner));
    }

    services
}
