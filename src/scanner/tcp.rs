//! TCP connect prober.
//!
//! Performs a full TCP handshake using the operating system's socket API.
//! A port is open if a connection is established within the timeout; the
//! connection is closed straight away without exchanging data.

use crate::scanner::traits::{PortState, Prober, Protocol, DEFAULT_TCP_TIMEOUT};
use crate::types::{Port, ScanTarget};
use async_trait::async_trait;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// TCP connect prober.
///
/// Refused, unreachable and timed-out connections are all reported as
/// closed. Does not require elevated privileges.
///
/// Resolved addresses are tried in order under one shared timeout, so an
/// address that silently drops the handshake can use up the whole budget
/// before a later address is tried.
#[derive(Debug, Clone)]
pub struct TcpProber {
    timeout: Duration,
}

impl TcpProber {
    /// Create a new TCP prober with the given connect timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Try each address in turn until one accepts a connection.
    async fn connect_any(addrs: &[SocketAddr]) -> io::Result<TcpStream> {
        let mut last_error = None;
        for addr in addrs {
            match TcpStream::connect(addr).await {
                Ok(stream) => return Ok(stream),
                Err(e) => last_error = Some(e),
            }
        }
        Err(last_error
            .unwrap_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no addresses to probe")))
    }
}

impl Default for TcpProber {
    fn default() -> Self {
        Self::new(DEFAULT_TCP_TIMEOUT)
    }
}

#[async_trait]
impl Prober for TcpProber {
    fn protocol(&self) -> Protocol {
        Protocol::Tcp
    }

    async fn probe(&self, target: &ScanTarget, port: Port) -> PortState {
        let addrs: Vec<SocketAddr> = target
            .addrs
            .iter()
            .map(|ip| SocketAddr::new(*ip, port.as_u16()))
            .collect();

        match timeout(self.timeout, Self::connect_any(&addrs)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                PortState::open(port)
            }
            Ok(Err(e)) => {
                debug!(host = %target.original, %port, error = %e, "tcp connect failed");
                PortState::closed(port)
            }
            Err(_) => {
                debug!(host = %target.original, %port, "tcp connect timed out");
                PortState::closed(port)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
    use tokio::net::TcpListener;

    fn loopback() -> ScanTarget {
        ScanTarget::new("127.0.0.1", vec![IpAddr::V4(Ipv4Addr::LOCALHOST)]).unwrap()
    }

    /// A loopback port that nothing is listening on.
    async fn closed_port() -> Port {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        Port::new(port).unwrap()
    }

    #[test]
    fn test_prober_creation() {
        let prober = TcpProber::default();
        assert_eq!(prober.timeout, Duration::from_secs(1));
        assert_eq!(prober.protocol(), Protocol::Tcp);
    }

    #[tokio::test]
    async fn test_probe_open_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = Port::new(listener.local_addr().unwrap().port()).unwrap();

        let state = TcpProber::default().probe(&loopback(), port).await;
        assert_eq!(state, PortState::open(port));
    }

    #[tokio::test]
    async fn test_probe_closed_port() {
        let port = closed_port().await;

        let state = TcpProber::new(Duration::from_millis(500))
            .probe(&loopback(), port)
            .await;
        assert_eq!(state, PortState::closed(port));
    }

    #[tokio::test]
    async fn test_probe_falls_through_to_later_address() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = Port::new(listener.local_addr().unwrap().port()).unwrap();

        // ::1 is refused (or unroutable) on this port; 127.0.0.1 accepts.
        let target = ScanTarget::new(
            "localhost",
            vec![
                IpAddr::V6(Ipv6Addr::LOCALHOST),
                IpAddr::V4(Ipv4Addr::LOCALHOST),
            ],
        )
        .unwrap();

        let state = TcpProber::default().probe(&target, port).await;
        assert!(state.open);
    }
}
