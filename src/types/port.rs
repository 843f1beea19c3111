//! Port types with validation and parsing.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).
//! `PortRange` and `PortSpec` handle the textual port specifications accepted
//! by a scan: a single port (`"80"`) or an inclusive range (`"20-25"`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator between the two bounds of a range specification.
const RANGE_SEPARATOR: char = '-';

/// A validated network port number (1-65535).
///
/// Using a newtype prevents accidental misuse of raw u16 values
/// and ensures port numbers are always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
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

/// Error type for port parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("invalid port '{0}': expected an integer between 1 and 65535")]
    InvalidPort(String),
    #[error("invalid port range '{0}': expected <low>-<high>")]
    InvalidRange(String),
    #[error("inverted port range: start ({0}) > end ({1})")]
    InvertedRange(u16, u16),
}

/// A range of ports (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    start: Port,
    end: Port,
}

impl PortRange {
    /// Create a new port range. `start` must not be above `end`.
    pub fn new(start: Port, end: Port) -> Result<Self, PortError> {
        if start > end {
            Err(PortError::InvertedRange(start.0, end.0))
        } else {
            Ok(Self { start, end })
        }
    }

    /// Get the number of ports in this range.
    pub const fn len(&self) -> usize {
        (self.end.0 - self.start.0) as usize + 1
    }

    /// A valid range always holds at least one port.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all ports in this range, ascending.
    pub fn iter(&self) -> impl Iterator<Item = Port> {
        (self.start.0..=self.end.0).map(Port)
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.start, RANGE_SEPARATOR, self.end)
    }
}

/// A single textual port specification, parsed.
///
/// Supports:
/// - Single port: "80"
/// - Inclusive range: "20-25"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSpec {
    Single(Port),
    Range(PortRange),
}

impl PortSpec {
    /// Ports covered by this specification, in ascending order.
    pub fn ports(&self) -> Box<dyn Iterator<Item = Port>> {
        match *self {
            Self::Single(port) => Box::new(std::iter::once(port)),
            Self::Range(range) => Box::new(range.iter()),
        }
    }

    /// Number of ports covered.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Range(range) => range.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl FromStr for PortSpec {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_range(s) {
            let (low, high) = parse_range(s)?;
            Ok(Self::Range(PortRange::new(low, high)?))
        } else {
            Ok(Self::Single(parse_single(s)?))
        }
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(port) => write!(f, "{}", port),
            Self::Range(range) => write!(f, "{}", range),
        }
    }
}

/// Whether the specification textually denotes a range.
pub fn is_range(spec: &str) -> bool {
    spec.contains(RANGE_SEPARATOR)
}

/// Parse a single base-10 port number in 1-65535.
pub fn parse_single(spec: &str) -> Result<Port, PortError> {
    let invalid = || PortError::InvalidPort(spec.to_string());

    let value: u32 = spec.parse().map_err(|_| invalid())?;
    u16::try_from(value)
        .ok()
        .and_then(Port::new)
        .ok_or_else(invalid)
}

/// Parse `<low>-<high>` into its two bounds.
///
/// The bounds are not required to be ordered; [`expand`] rejects inverted
/// ranges.
pub fn parse_range(spec: &str) -> Result<(Port, Port), PortError> {
    let invalid = || PortError::InvalidRange(spec.to_string());

    let mut bounds = spec.split(RANGE_SEPARATOR);
    match (bounds.next(), bounds.next(), bounds.next()) {
        (Some(low), Some(high), None) => {
            let low = parse_single(low).map_err(|_| invalid())?;
            let high = parse_single(high).map_err(|_| invalid())?;
            Ok((low, high))
        }
        _ => Err(invalid()),
    }
}

/// Expand a textual specification into the ports it names, in order.
pub fn expand(spec: &str) -> Result<Vec<Port>, PortError> {
    let spec: PortSpec = spec.parse()?;
    Ok(spec.ports().collect())
}
