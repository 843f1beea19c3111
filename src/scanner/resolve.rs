//! Hostname resolution.
//!
//! Resolution is the gate in front of probing: a host that does not resolve
//! is reported as not found and none of its ports are probed.

use crate::types::{ScanTarget, TargetError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use tokio::sync::OnceCell;
use tracing::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// Strategy used to turn a hostname into addresses.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Resolver {
    /// The operating system resolver (honours `/etc/hosts`).
    #[default]
    System,
    /// Direct DNS queries using the system resolver configuration.
    Dns,
}

/// Resolves the hosts of one scan.
///
/// The DNS client is built on first use and reused for every later host,
/// so its cache and configuration outlive a single lookup.
pub struct HostResolver {
    strategy: Resolver,
    dns: OnceCell<TokioAsyncResolver>,
}

impl HostResolver {
    pub fn new(strategy: Resolver) -> Self {
        Self {
            strategy,
            dns: OnceCell::new(),
        }
    }

    pub fn strategy(&self) -> Resolver {
        self.strategy
    }

    /// Resolve `host` to a scan target.
    ///
    /// IP literals resolve to themselves without any lookup.
    pub async fn resolve(&self, host: &str) -> Result<ScanTarget, TargetError> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return ScanTarget::new(host, vec![ip]);
        }

        let addrs = match self.strategy {
            Resolver::System => lookup_system(host).await?,
            Resolver::Dns => {
                let client = self.dns.get_or_init(|| async { dns_client() }).await;
                lookup_dns(client, host).await?
            }
        };

        debug!(host, resolver = %self.strategy, addrs = ?addrs, "resolved host");
        ScanTarget::new(host, addrs)
    }
}

impl fmt::Display for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::Dns => write!(f, "dns"),
        }
    }
}

async fn lookup_system(host: &str) -> Result<Vec<IpAddr>, TargetError> {
    let resolved = tokio::net::lookup_host((host, 0))
        .await
        .map_err(|e| TargetError::DnsResolutionFailed(host.to_string(), e.to_string()))?;

    let mut addrs: Vec<IpAddr> = Vec::new();
    for addr in resolved {
        if !addrs.contains(&addr.ip()) {
            addrs.push(addr.ip());
        }
    }
    Ok(addrs)
}

fn dns_client() -> TokioAsyncResolver {
    TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|e| {
        debug!(error = %e, "system resolver configuration unavailable, using defaults");
        TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
    })
}

async fn lookup_dns(client: &TokioAsyncResolver, host: &str) -> Result<Vec<IpAddr>, TargetError> {
    let response = client
        .lookup_ip(host)
        .await
        .map_err(|e| TargetError::DnsResolutionFailed(host.to_string(), e.to_string()))?;

    Ok(response.iter().collect())
}
