//! Prober trait abstraction and scan data types.
//!
//! Defines a common interface for the TCP and UDP probe implementations,
//! plus the configuration and result types that flow through a scan.

use crate::error::{ScanError, ScanResult};
use crate::scanner::resolve::Resolver;
use crate::types::{Port, ScanTarget};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default TCP connect timeout.
pub const DEFAULT_TCP_TIMEOUT: Duration = Duration::from_secs(1);

/// Default time to wait for a UDP reply.
pub const DEFAULT_UDP_TIMEOUT: Duration = Duration::from_millis(200);

/// Transport protocol used for a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Udp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp => write!(f, "TCP"),
            Self::Udp => write!(f, "UDP"),
        }
    }
}

/// Outcome of probing a single port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortState {
    /// The port that was probed.
    pub port: Port,
    /// Whether the probe concluded the port is open.
    pub open: bool,
}

impl PortState {
    pub const fn new(port: Port, open: bool) -> Self {
        Self { port, open }
    }

    pub const fn open(port: Port) -> Self {
        Self::new(port, true)
    }

    pub const fn closed(port: Port) -> Self {
        Self::new(port, false)
    }

    /// `"open"` or `"closed"`.
    pub const fn state_str(&self) -> &'static str {
        if self.open {
            "open"
        } else {
            "closed"
        }
    }
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.port, self.state_str())
    }
}

/// Scan results for one host.
///
/// A host that failed resolution has `not_found` set and no port states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostResults {
    pub host: String,
    pub not_found: bool,
    pub port_states: Vec<PortState>,
}

impl HostResults {
    /// Results for a resolved host, to be filled with port states.
    pub fn found(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            not_found: false,
            port_states: Vec::new(),
        }
    }

    /// Results for a host that could not be resolved.
    pub fn not_found(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            not_found: true,
            port_states: Vec::new(),
        }
    }

    /// Number of ports reported open.
    pub fn open_count(&self) -> usize {
        self.port_states.iter().filter(|p| p.open).count()
    }
}

/// Configuration for a scan.
///
/// Exactly one of `tcp` and `udp` must be set; [`ScanConfig::protocol`]
/// enforces this.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Run a TCP connect scan.
    pub tcp: bool,
    /// Run a UDP datagram scan.
    pub udp: bool,
    /// Port specifications, in the order they should be probed.
    pub ports: Vec<String>,
    /// Connect timeout for TCP probes.
    pub tcp_timeout: Duration,
    /// Reply wait for UDP probes.
    pub udp_timeout: Duration,
    /// How hostnames are resolved.
    pub resolver: Resolver,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            tcp: false,
            udp: false,
            ports: Vec::new(),
            tcp_timeout: DEFAULT_TCP_TIMEOUT,
            udp_timeout: DEFAULT_UDP_TIMEOUT,
            resolver: Resolver::default(),
        }
    }
}

impl ScanConfig {
    /// Create a scan configuration for the given protocol and port specs.
    pub fn new<I, S>(protocol: Protocol, ports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tcp: protocol == Protocol::Tcp,
            udp: protocol == Protocol::Udp,
            ports: ports.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// The selected protocol, or a configuration error.
    pub fn protocol(&self) -> ScanResult<Protocol> {
        match (self.tcp, self.udp) {
            (true, false) => Ok(Protocol::Tcp),
            (false, true) => Ok(Protocol::Udp),
            (false, false) => Err(ScanError::NoProtocol),
            (true, true) => Err(ScanError::ConflictingProtocols),
        }
    }

    /// Set the TCP connect timeout.
    pub fn with_tcp_timeout(mut self, timeout: Duration) -> Self {
        self.tcp_timeout = timeout;
        self
    }

    /// Set the UDP reply timeout.
    pub fn with_udp_timeout(mut self, timeout: Duration) -> Self {
        self.udp_timeout = timeout;
        self
    }

    /// Set the resolver.
    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }
}

/// Trait for single-port probe implementations.
///
/// A probe never fails: anything short of a positive answer is reported
/// as a closed port.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Protocol this prober speaks.
    fn protocol(&self) -> Protocol;

    /// Probe one port on a resolved target.
    async fn probe(&self, target: &ScanTarget, port: Port) -> PortState;
}

/// A boxed prober for dynamic dispatch.
pub type BoxedProber = Box<dyn Prober>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_selection() {
        assert_eq!(
            ScanConfig::new(Protocol::Tcp, ["80"]).protocol(),
            Ok(Protocol::Tcp)
        );
        assert_eq!(
            ScanConfig::new(Protocol::Udp, ["53"]).protocol(),
            Ok(Protocol::Udp)
        );

        let neither = ScanConfig::default();
        assert_eq!(neither.protocol(), Err(ScanError::NoProtocol));

        let both = ScanConfig {
            tcp: true,
            udp: true,
            ..ScanConfig::default()
        };
        assert_eq!(both.protocol(), Err(ScanError::ConflictingProtocols));
    }

    #[test]
    fn test_config_defaults() {
        let config = ScanConfig::new(Protocol::Tcp, ["22-443"]);
        assert_eq!(config.ports, vec!["22-443".to_string()]);
        assert_eq!(config.tcp_timeout, Duration::from_secs(1));
        assert_eq!(config.udp_timeout, Duration::from_millis(200));
    }

    #[test]
    fn test_port_state_display() {
        let port = Port::new(80).unwrap();
        assert_eq!(PortState::open(port).to_string(), "80: open");
        assert_eq!(PortState::closed(port).to_string(), "80: closed");
    }

    #[test]
    fn test_host_results_serialization() {
        let mut results = HostResults::found("localhost");
        results.port_states.push(PortState::open(Port::new(22).unwrap()));

        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["host"], "localhost");
        assert_eq!(json["not_found"], false);
        assert_eq!(json["port_states"][0]["port"], 22);
        assert_eq!(json["port_states"][0]["open"], true);
        assert_eq!(results.open_count(), 1);
    }
}
