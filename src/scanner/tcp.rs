//! TCP connect probe.
//!
//! Performs standard TCP connect checks using the operating system's
//! socket API. No elevated privileges are needed, and closed, filtered and
//! errored ports all collapse into "not open".

use crate::error::{ScanError, ScanResult};
use crate::scanner::traits::PortProbe;
use crate::types::Port;
use async_trait::async_trait;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// TCP connect probe against one resolved address.
pub struct TcpConnectProbe {
    target: IpAddr,
    timeout: Duration,
}

impl TcpConnectProbe {
    /// Create a new TCP connect probe.
    ///
    /// # Arguments
    /// * `target` - Target IP address to probe
    /// * `timeout` - Connection timeout per port
    pub fn new(target: IpAddr, timeout: Duration) -> Self {
        Self { target, timeout }
    }

    /// Attempt to connect to the target address.
    async fn attempt_connect(&self, addr: SocketAddr) -> ScanResult<TcpStream> {
        match timeout(self.timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => Err(ScanError::from_connect(addr.port(), e)),
            Err(_) => Err(ScanError::Timeout),
        }
    }
}

#[async_trait]
impl PortProbe for TcpConnectProbe {
    async fn check_port(&self, port: Port) -> bool {
        let addr = SocketAddr::new(self.target, port.as_u16());

        match self.attempt_connect(addr).await {
            // Dropping the stream closes the socket straight away.
            Ok(_stream) => true,
            Err(e) => {
                trace!(%port, error = %e, "port not open");
                false
            }
        }
    }
}
