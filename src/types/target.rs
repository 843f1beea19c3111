//! Resolved scan targets.
//!
//! A hostname from the host list becomes a `ScanTarget` once resolution
//! has produced at least one address for it.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// A host that has been resolved to one or more IP addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanTarget {
    /// The hostname as it appears in the host list.
    pub original: String,
    /// Resolved addresses, in resolver order. Never empty.
    pub addrs: Vec<IpAddr>,
}

impl ScanTarget {
    /// Create a new scan target.
    ///
    /// Returns `NoAddressesFound` if `addrs` is empty.
    pub fn new(original: impl Into<String>, addrs: Vec<IpAddr>) -> Result<Self, TargetError> {
        let original = original.into();
        if addrs.is_empty() {
            return Err(TargetError::NoAddressesFound(original));
        }
        Ok(Self { original, addrs })
    }

    /// The address datagram probes are sent to: the first IPv4 address if
    /// there is one, otherwise the first address.
    pub fn preferred_addr(&self) -> IpAddr {
        self.addrs
            .iter()
            .copied()
            .find(IpAddr::is_ipv4)
            .unwrap_or(self.addrs[0])
    }
}

/// Error type for target resolution.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TargetError {
    #[error("failed to resolve hostname '{0}': {1}")]
    DnsResolutionFailed(String, String),
    #[error("no IP addresses found for hostname '{0}'")]
    NoAddressesFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_empty_addresses_rejected() {
        let result = ScanTarget::new("example.com", Vec::new());
        assert!(matches!(result, Err(TargetError::NoAddressesFound(_))));
    }

    #[test]
    fn test_preferred_addr_picks_ipv4() {
        let target = ScanTarget::new(
            "localhost",
            vec![
                IpAddr::V6(Ipv6Addr::LOCALHOST),
                IpAddr::V4(Ipv4Addr::LOCALHOST),
            ],
        )
        .unwrap();
        assert_eq!(target.preferred_addr(), IpAddr::V4(Ipv4Addr::LOCALHOST));

        let target = ScanTarget::new("ip6-localhost", vec![IpAddr::V6(Ipv6Addr::LOCALHOST)])
            .unwrap();
        assert_eq!(target.preferred_addr(), IpAddr::V6(Ipv6Addr::LOCALHOST));
    }
}
