//! Port types and the lenient port-set builder.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).
//! `PortRange` and `PortSpec` turn a user's "22,80,8000-8010" style input
//! into the working set the prober consumes.

use std::fmt;
use tracing::debug;

/// A validated network port number (1-65535).
///
/// Using a newtype prevents accidental misuse of raw u16 values
/// and ensures port numbers are always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;
    /// Maximum valid port number.
    pub const MAX: u16 = 65535;

    /// Create a new Port from a u16, returning None if invalid.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Port {
    type Error = PortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PortError::OutOfRange(i64::from(value)))
    }
}

impl TryFrom<i64> for Port {
    type Error = PortError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(PortError::OutOfRange(value))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// Error type for port parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(i64),
    #[error("invalid port token: {0:?}")]
    InvalidFormat(String),
}

/// A range of ports (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    start: Port,
    end: Port,
}

impl PortRange {
    /// Create a range, swapping the bounds if they are reversed.
    pub fn new(a: Port, b: Port) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Build a range from raw bounds, clipping it to 1-65535.
    ///
    /// Returns `None` when nothing of the range survives the clip.
    pub fn clipped(a: i64, b: i64) -> Option<Self> {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo = lo.max(i64::from(Port::MIN));
        let hi = hi.min(i64::from(Port::MAX));
        if lo > hi {
            return None;
        }
        let start = Port::try_from(lo).ok()?;
        let end = Port::try_from(hi).ok()?;
        Some(Self::new(start, end))
    }

    /// Create a range containing a single port.
    pub const fn single(port: Port) -> Self {
        Self {
            start: port,
            end: port,
        }
    }

    /// Iterate over all ports in this range.
    pub fn iter(&self) -> impl Iterator<Item = Port> {
        (self.start.0..=self.end.0).map(Port)
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A port specification made of single ports and ranges.
///
/// Parsing is lenient: malformed tokens are skipped rather than rejected,
/// and values outside 1-65535 are dropped.
#[derive(Debug, Clone, Default)]
pub struct PortSpec {
    ranges: Vec<PortRange>,
}

impl PortSpec {
    /// Upper bound of the default working set.
    pub const DEFAULT_LAST_PORT: u16 = 100;

    /// Create an empty port specification.
    pub const fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Add a port range to the specification.
    pub fn add_range(&mut self, range: PortRange) {
        self.ranges.push(range);
    }

    /// The set scanned when the user gives no ports: 1-100.
    pub fn default_set() -> Self {
        let mut spec = Self::new();
        spec.add_range(PortRange::new(
            Port(Port::MIN),
            Port(Self::DEFAULT_LAST_PORT),
        ));
        spec
    }

    /// Build the working set from optional user input.
    ///
    /// Absent or blank input yields [`PortSpec::default_set`].
    pub fn from_user_input(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            Some(s) if !s.is_empty() => Self::parse(s),
            _ => Self::default_set(),
        }
    }

    /// Parse "22,80,8000-8010" style input, skipping anything malformed.
    pub fn parse(s: &str) -> Self {
        let mut spec = Self::new();

        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match parse_token(token) {
                Ok(Some(range)) => spec.add_range(range),
                Ok(None) => debug!(token, "port token outside 1-65535, dropped"),
                Err(e) => debug!(token, error = %e, "skipping malformed port token"),
            }
        }

        spec
    }

    /// Get all ports as a sorted, deduplicated vector.
    pub fn to_ports(&self) -> Vec<Port> {
        let mut ports: Vec<Port> = self.ranges.iter().flat_map(|r| r.iter()).collect();
        ports.sort_unstable();
        ports.dedup();
        ports
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.ranges.iter().map(|r| r.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

/// Parse one comma-separated token into a clipped range.
fn parse_token(token: &str) -> Result<Option<PortRange>, PortError> {
    let number = |s: &str| {
        s.trim()
            .parse::<i64>()
            .map_err(|_| PortError::InvalidFormat(token.to_string()))
    };

    match token.split_once('-') {
        Some((a, b)) => Ok(PortRange::clipped(number(a)?, number(b)?)),
        None => {
            let value = number(token)?;
            Ok(Port::try_from(value).ok().map(PortRange::single))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(spec: &PortSpec) -> Vec<u16> {
        spec.to_ports().into_iter().map(u16::from).collect()
    }

    #[test]
    fn test_port_validation() {
        assert!(Port::new(0).is_none());
        assert!(Port::new(1).is_some());
        assert!(Port::new(65535).is_some());
        assert_eq!(Port::try_from(70000_i64), Err(PortError::OutOfRange(70000)));
    }

    #[test]
    fn test_port_spec_parsing() {
        assert_eq!(raw(&PortSpec::parse("80")), vec![80]);
        assert_eq!(raw(&PortSpec::parse("80, 443")), vec![80, 443]);
        assert_eq!(PortSpec::parse("1-100").to_ports().len(), 100);
        assert_eq!(PortSpec::parse("22,80,443,8000-8010").to_ports().len(), 14);
    }

    #[test]
    fn test_port_spec_dedup_and_order() {
        assert_eq!(raw(&PortSpec::parse("443,80,80,22")), vec![22, 80, 443]);
    }

    #[test]
    fn test_reversed_range_is_swapped() {
        assert_eq!(raw(&PortSpec::parse("10-8")), vec![8, 9, 10]);
    }

    #[test]
    fn test_malformed_tokens_are_skipped() {
        assert_eq!(raw(&PortSpec::parse("abc,22,,x-9,5-y,-3,80")), vec![22, 80]);
        assert!(PortSpec::parse("nope").to_ports().is_empty());
    }

    #[test]
    fn test_out_of_range_values_are_dropped() {
        assert_eq!(raw(&PortSpec::parse("0,65536,22")), vec![22]);
        assert_eq!(raw(&PortSpec::parse("0-2")), vec![1, 2]);
        assert_eq!(raw(&PortSpec::parse("65534-70000")), vec![65534, 65535]);
        assert!(PortSpec::parse("70000-80000").to_ports().is_empty());
    }

    #[test]
    fn test_default_set() {
        let ports = PortSpec::from_user_input(None).to_ports();
        assert_eq!(ports.len(), 100);
        assert_eq!(ports.first().map(|p| p.as_u16()), Some(1));
        assert_eq!(ports.last().map(|p| p.as_u16()), Some(100));

        assert_eq!(PortSpec::from_user_input(Some("  ")).to_ports().len(), 100);
        assert_eq!(PortSpec::from_user_input(Some("22")).to_ports().len(), 1);
    }

    #[test]
    fn test_display() {
        let spec = PortSpec::parse("22,8000-8010");
        assert_eq!(spec.to_string(), "22,8000-8010");

        // Reversed and clipped ranges print as normalized.
        assert_eq!(PortSpec::parse("10-8, 0-2, bad").to_string(), "8-10,1-2");
    }
}
