//! Error types for portaudit.
//!
//! Uses `thiserror` for ergonomic error definitions. Network errors never
//! leave the unit of work for a single port; the other kinds surface to
//! the binary.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single network operation against one port.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("connection to port {port} failed: {reason}")]
    ConnectionFailed { port: u16, reason: String },

    #[error("operation timed out")]
    Timeout,

    #[error("connection refused")]
    ConnectionRefused,

    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("host unreachable")]
    HostUnreachable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Classify a connect error by its OS error kind.
    pub fn from_connect(port: u16, err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match err.kind() {
            ErrorKind::ConnectionRefused => Self::ConnectionRefused,
            ErrorKind::TimedOut => Self::Timeout,
            ErrorKind::NetworkUnreachable => Self::NetworkUnreachable(err.to_string()),
            ErrorKind::HostUnreachable => Self::HostUnreachable,
            _ => Self::ConnectionFailed {
                port,
                reason: err.to_string(),
            },
        }
    }
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors raised while loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine a configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings file: {0}")]
    InvalidFormat(String),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while rendering or saving a report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_connect_error_classification() {
        let refused = ScanError::from_connect(80, Error::from(ErrorKind::ConnectionRefused));
        assert!(matches!(refused, ScanError::ConnectionRefused));

        let timed_out = ScanError::from_connect(80, Error::from(ErrorKind::TimedOut));
        assert!(matches!(timed_out, ScanError::Timeout));

        let other = ScanError::from_connect(443, Error::new(ErrorKind::Other, "boom"));
        match other {
            ScanError::ConnectionFailed { port, reason } => {
                assert_eq!(port, 443);
                assert!(reason.contains("boom"));
            }
            e => panic!("unexpected variant: {e:?}"),
        }
    }
}
