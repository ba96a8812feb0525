//! Banner grabbing functionality for TCP connections.
//!
//! Capture runs in two phases on a fresh connection:
//! 1. Passive: read whatever the service sends on its own (SSH, SMTP,
//!    FTP, POP3 and IMAP servers greet first).
//! 2. Active: if no bytes arrived, send a small protocol-specific probe
//!    chosen by port number and read once more.
//!
//! Any bytes in the passive phase end capture, even if they decode to
//! nothing but whitespace.
//!
//! Every network operation is bounded by the same timeout, so one port can
//! take up to four timeouts in total (connect, read, write, read).

use crate::error::{ScanError, ScanResult};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, trace};

/// Maximum bytes to read for a banner.
const MAX_BANNER_SIZE: usize = 1024;

/// Greeting sent to SMTP servers that stay silent.
const SMTP_PROBE: &[u8] = b"EHLO example.com\r\n";

/// Protocol probe used to elicit a response from a silent service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveProbe {
    /// Minimal HTTP/1.0 request carrying the target as `Host`.
    Http(String),
    /// SMTP `EHLO` greeting.
    Smtp,
}

impl ActiveProbe {
    /// Choose the probe for a port, if one is defined.
    ///
    /// SSH (22) deliberately gets none: a server that did not greet is left
    /// bannerless rather than fed bytes mid-handshake.
    pub fn for_port(port: u16, host: &str) -> Option<Self> {
        match port {
            80 | 443 | 8080 => Some(Self::Http(host.to_string())),
            25 => Some(Self::Smtp),
            _ => None,
        }
    }

    /// The bytes written to the socket.
    pub fn payload(&self) -> Vec<u8> {
        match self {
            Self::Http(host) => format!("GET / HTTP/1.0\r\nHost: {host}\r\n\r\n").into_bytes(),
            Self::Smtp => SMTP_PROBE.to_vec(),
        }
    }
}

/// Outcome of a single bounded read.
enum ReadOutcome {
    /// At least one byte arrived; whitespace-only data decodes to `None`.
    Data(Option<String>),
    /// The read timed out or the peer closed without sending anything.
    Nothing,
}

/// Grab a banner from a TCP port.
///
/// `host` is the target as the user wrote it; it fills the HTTP `Host`
/// header. Returns `None` if no banner could be retrieved for any reason.
pub async fn grab_banner(addr: SocketAddr, host: &str, op_timeout: Duration) -> Option<String> {
    grab_banner_with(addr, ActiveProbe::for_port(addr.port(), host), op_timeout).await
}

/// Grab a banner, using `probe` if the service stays silent.
pub async fn grab_banner_with(
    addr: SocketAddr,
    probe: Option<ActiveProbe>,
    op_timeout: Duration,
) -> Option<String> {
    match capture(addr, probe, op_timeout).await {
        Ok(banner) => banner,
        Err(e) => {
            debug!(port = addr.port(), error = %e, "banner capture failed");
            None
        }
    }
}

async fn capture(
    addr: SocketAddr,
    probe: Option<ActiveProbe>,
    op_timeout: Duration,
) -> ScanResult<Option<String>> {
    let port = addr.port();

    // The stream is dropped, and the socket closed, on every return path.
    let mut stream = match timeout(op_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => return Err(ScanError::from_connect(port, e)),
        Err(_) => return Err(ScanError::Timeout),
    };

    if let ReadOutcome::Data(banner) = read_banner(&mut stream, op_timeout).await? {
        trace!(port, "passive data received");
        return Ok(banner);
    }

    let Some(probe) = probe else {
        return Ok(None);
    };

    trace!(port, ?probe, "sending active probe");
    match timeout(op_timeout, stream.write_all(&probe.payload())).await {
        Ok(result) => result?,
        Err(_) => return Err(ScanError::Timeout),
    }

    match read_banner(&mut stream, op_timeout).await? {
        ReadOutcome::Data(banner) => Ok(banner),
        ReadOutcome::Nothing => Ok(None),
    }
}

/// Perform one bounded read and decode whatever arrived.
async fn read_banner(stream: &mut TcpStream, op_timeout: Duration) -> ScanResult<ReadOutcome> {
    let mut buffer = vec![0u8; MAX_BANNER_SIZE];

    match timeout(op_timeout, stream.read(&mut buffer)).await {
        Ok(Ok(0)) => Ok(ReadOutcome::Nothing),
        Ok(Ok(n)) => Ok(ReadOutcome::Data(decode_banner(&buffer[..n]))),
        Ok(Err(e)) => Err(e.into()),
        Err(_) => Ok(ReadOutcome::Nothing),
    }
}

/// Decode raw banner bytes.
///
/// Invalid UTF-8 is replaced rather than rejected. Surrounding whitespace is
/// trimmed, and a banner that is empty afterwards counts as no banner.
pub fn decode_banner(data: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(data);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
