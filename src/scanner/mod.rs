//! Scanner module - drives a scan over the host list.
//!
//! The engine resolves each host in turn and, for hosts that resolve, runs
//! one probe per expanded port. Everything is awaited sequentially: host
//! order first, then port order, one socket at a time.

pub mod resolve;
pub mod tcp;
pub mod traits;
pub mod udp;

use crate::error::ScanResult;
use crate::storage::HostSet;
use crate::types::{port, Port};
use tracing::{debug, info, warn};

pub use resolve::{HostResolver, Resolver};
pub use tcp::TcpProber;
pub use traits::{
    BoxedProber, HostResults, PortState, Prober, Protocol, ScanConfig, DEFAULT_TCP_TIMEOUT,
    DEFAULT_UDP_TIMEOUT,
};
pub use udp::UdpProber;

/// Create the prober for a protocol using the timeouts from `config`.
pub fn create_prober(protocol: Protocol, config: &ScanConfig) -> BoxedProber {
    match protocol {
        Protocol::Tcp => Box::new(TcpProber::new(config.tcp_timeout)),
        Protocol::Udp => Box::new(UdpProber::new(config.udp_timeout)),
    }
}

/// Expand port specifications in order, skipping any that are malformed.
pub fn expand_port_specs<S: AsRef<str>>(specs: &[S]) -> Vec<Port> {
    let mut ports = Vec::new();
    for spec in specs {
        let spec = spec.as_ref();
        match port::expand(spec) {
            Ok(expanded) => ports.extend(expanded),
            Err(e) => warn!(spec, error = %e, "skipping port specification"),
        }
    }
    ports
}

/// Sequential scan engine.
pub struct ScanEngine {
    prober: BoxedProber,
    resolver: HostResolver,
    ports: Vec<Port>,
}

impl ScanEngine {
    /// Build an engine from a scan configuration.
    ///
    /// Fails if the configuration does not select exactly one protocol.
    pub fn new(config: &ScanConfig) -> ScanResult<Self> {
        let protocol = config.protocol()?;
        Ok(Self::with_prober(
            create_prober(protocol, config),
            config.resolver,
            config.ports.as_slice(),
        ))
    }

    /// Build an engine around an existing prober.
    pub fn with_prober<S: AsRef<str>>(prober: BoxedProber, resolver: Resolver, specs: &[S]) -> Self {
        Self {
            prober,
            resolver: HostResolver::new(resolver),
            ports: expand_port_specs(specs),
        }
    }

    pub fn protocol(&self) -> Protocol {
        self.prober.protocol()
    }

    /// Ports probed on every resolved host, in probe order.
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Scan every host in the set, in set order.
    pub async fn run(&self, hosts: &HostSet) -> Vec<HostResults> {
        info!(
            protocol = %self.protocol(),
            hosts = hosts.len(),
            ports = self.ports.len(),
            "starting scan"
        );

        let mut results = Vec::with_capacity(hosts.len());
        for host in hosts.iter() {
            results.push(self.scan_host(host).await);
        }
        results
    }

    /// Resolve one host and probe its ports.
    pub async fn scan_host(&self, host: &str) -> HostResults {
        let target = match self.resolver.resolve(host).await {
            Ok(target) => target,
            Err(e) => {
                info!(host, error = %e, "host not found");
                return HostResults::not_found(host);
            }
        };

        let mut results = HostResults::found(host);
        results.port_states.reserve(self.ports.len());
        for &port in &self.ports {
            let state = self.prober.probe(&target, port).await;
            debug!(host, %port, open = state.open, "probed");
            results.port_states.push(state);
        }

        info!(host, open = results.open_count(), "host scanned");
        results
    }
}

/// Run a complete scan of `hosts` with `config`.
///
/// Only a configuration error is returned; unresolvable hosts and closed
/// ports are part of the results.
pub async fn run_scan(hosts: &HostSet, config: &ScanConfig) -> ScanResult<Vec<HostResults>> {
    let engine = ScanEngine::new(config)?;
    Ok(engine.run(hosts).await)
}
