//! Scan target type.
//!
//! A target is an IP address or hostname string. It is not validated up
//! front; a name that cannot be resolved shows up as every port being
//! unreachable, not as a separate error path.

use std::fmt;
use std::net::IpAddr;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// The host being scanned, as the user wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target(String);

impl Target {
    /// Wrap a host string.
    pub fn new(host: impl Into<String>) -> Self {
        Self(host.into())
    }

    /// The host string, used verbatim in reports and HTTP `Host` headers.
    pub fn host(&self) -> &str {
        &self.0
    }

    /// Resolve the target to a single IP address.
    ///
    /// IP literals are returned directly. Hostnames are resolved with the
    /// system resolver configuration, falling back to the library default
    /// when that cannot be read. Surrounding whitespace is ignored here only;
    /// the stored host stays as typed.
    pub async fn resolve(&self) -> Result<IpAddr, TargetError> {
        let host = self.host().trim();

        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(ip);
        }
        // Bracketed IPv6 literals, as typed in URLs.
        if let Some(ip) = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .and_then(|h| h.parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }
        if host.is_empty() {
            return Err(TargetError::Empty);
        }

        let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|_| {
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
        });

        let response = resolver
            .lookup_ip(host)
            .await
            .map_err(|e| TargetError::DnsResolutionFailed(host.to_string(), e.to_string()))?;

        // Only the first address is scanned; multi-host sweeps are out of scope.
        response
            .iter()
            .next()
            .ok_or_else(|| TargetError::NoAddressesFound(host.to_string()))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Target {
    fn from(host: &str) -> Self {
        Self::new(host)
    }
}

impl From<String> for Target {
    fn from(host: String) -> Self {
        Self::new(host)
    }
}

/// Error type for target resolution.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TargetError {
    #[error("empty target")]
    Empty,
    #[error("failed to resolve hostname '{0}': {1}")]
    DnsResolutionFailed(String, String),
    #[error("no IP addresses found for hostname '{0}'")]
    NoAddressesFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[tokio::test]
    async fn test_resolve_ip_literals() {
        let v4 = Target::new("127.0.0.1").resolve().await.unwrap();
        assert_eq!(v4, IpAddr::V4(Ipv4Addr::LOCALHOST));

        let v6 = Target::new("::1").resolve().await.unwrap();
        assert_eq!(v6, IpAddr::V6(Ipv6Addr::LOCALHOST));

        let bracketed = Target::new("[::1]").resolve().await.unwrap();
        assert_eq!(bracketed, IpAddr::V6(Ipv6Addr::LOCALHOST));
    }

    #[tokio::test]
    async fn test_resolve_empty_target() {
        let err = Target::new("   ").resolve().await.unwrap_err();
        assert!(matches!(err, TargetError::Empty));
    }

    #[test]
    fn test_host_is_kept_verbatim() {
        let target = Target::from("example.com");
        assert_eq!(target.host(), "example.com");
        assert_eq!(target.to_string(), "example.com");

        let padded = Target::new(" 127.0.0.1 ");
        assert_eq!(padded.host(), " 127.0.0.1 ");
    }

    #[tokio::test]
    async fn test_resolve_ignores_surrounding_whitespace() {
        let ip = Target::new(" 127.0.0.1\t").resolve().await.unwrap();
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }
}
