//! Probe trait abstraction.
//!
//! The worker pool in [`super::prober`] only needs a yes/no answer per
//! port. Putting that behind a trait lets the pool be driven by the real
//! TCP connect probe or by test doubles.

use crate::types::Port;
use async_trait::async_trait;

/// A single-port reachability check.
///
/// Implementations must be total: every failure mode (refused, timed out,
/// unreachable, unresolvable) is reported as `false`, never as a panic or
/// an error.
///
/// # Example
///
/// ```ignore
/// use portaudit::scanner::PortProbe;
/// use portaudit::types::Port;
///
/// async fn is_up<P: PortProbe>(probe: &P, port: Port) -> bool {
///     probe.check_port(port).await
/// }
/// ```
#[async_trait]
pub trait PortProbe: Send + Sync {
    /// Report whether a connection to `port` can be established.
    async fn check_port(&self, port: Port) -> bool;
}

