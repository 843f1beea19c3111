//! UDP datagram prober.
//!
//! UDP has no handshake, so the verdict is a heuristic: a single one-byte
//! datagram is sent and the port is reported open only if *any* reply
//! arrives before the deadline.
//!
//! # Accuracy
//!
//! This is not an accuracy guarantee. Many open UDP services ignore a
//! payload they do not understand and will be reported as closed. A send
//! failure, a receive error (such as an ICMP port unreachable surfacing as
//! "connection refused") or silence all count as closed.

use crate::scanner::traits::{PortState, Prober, Protocol, DEFAULT_UDP_TIMEOUT};
use crate::types::{Port, ScanTarget};
use async_trait::async_trait;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::debug;

/// Payload sent to every probed port.
const PROBE_PAYLOAD: &[u8] = b"c";

/// Receive buffer size; the reply content is only logged.
const RECV_BUFFER_SIZE: usize = 1024;

/// UDP prober.
#[derive(Debug, Clone)]
pub struct UdpProber {
    timeout: Duration,
}

impl UdpProber {
    /// Create a new UDP prober.
    ///
    /// # Arguments
    /// * `timeout` - How long to wait for a reply datagram
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Send the probe payload and return the connected socket.
    async fn send_probe(addr: SocketAddr) -> io::Result<UdpSocket> {
        let local: SocketAddr = if addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(local).await?;
        socket.connect(addr).await?;
        socket.send(PROBE_PAYLOAD).await?;
        Ok(socket)
    }
}

impl Default for UdpProber {
    fn default() -> Self {
        Self::new(DEFAULT_UDP_TIMEOUT)
    }
}

#[async_trait]
impl Prober for UdpProber {
    fn protocol(&self) -> Protocol {
        Protocol::Udp
    }

    async fn probe(&self, target: &ScanTarget, port: Port) -> PortState {
        let addr = SocketAddr::new(target.preferred_addr(), port.as_u16());

        let socket = match Self::send_probe(addr).await {
            Ok(socket) => socket,
            Err(e) => {
                debug!(%addr, error = %e, "udp probe could not be sent");
                return PortState::closed(port);
            }
        };

        let mut buf = [0u8; RECV_BUFFER_SIZE];
        match timeout(self.timeout, socket.recv(&mut buf)).await {
            Ok(Ok(n)) => {
                debug!(%addr, bytes = n, reply = %String::from_utf8_lossy(&buf[..n]), "udp reply");
                PortState::open(port)
            }
            Ok(Err(e)) => {
                debug!(%addr, error = %e, "udp receive failed");
                PortState::closed(port)
            }
            Err(_) => {
                debug!(%addr, "no udp reply before deadline");
                PortState::closed(port)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    fn loopback() -> ScanTarget {
        ScanTarget::new("127.0.0.1", vec![IpAddr::V4(Ipv4Addr::LOCALHOST)]).unwrap()
    }

    #[test]
    fn test_prober_creation() {
        let prober = UdpProber::default();
        assert_eq!(prober.timeout, Duration::from_millis(200));
        assert_eq!(prober.protocol(), Protocol::Udp);
    }

    #[tokio::test]
    async fn test_probe_replying_port_is_open() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = Port::new(server.local_addr().unwrap().port()).unwrap();

        let echo = tokio::spawn(async move {
            let mut buf = [0u8; 16];
            let (n, peer) = server.recv_from(&mut buf).await.unwrap();
            assert_eq!(&buf[..n], PROBE_PAYLOAD);
            server.send_to(b"pong", peer).await.unwrap();
        });

        let state = UdpProber::new(Duration::from_secs(2))
            .probe(&loopback(), port)
            .await;
        assert_eq!(state, PortState::open(port));
        echo.await.unwrap();
    }

    #[tokio::test]
    async fn test_probe_silent_port_is_closed() {
        // Bound but never answers.
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = Port::new(server.local_addr().unwrap().port()).unwrap();

        let state = UdpProber::default().probe(&loopback(), port).await;
        assert_eq!(state, PortState::closed(port));
    }

    #[tokio::test]
    async fn test_probe_unbound_port_is_closed() {
        // Nothing bound: the port unreachable reply surfaces as a receive error.
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = Port::new(socket.local_addr().unwrap().port()).unwrap();
        drop(socket);

        let state = UdpProber::new(Duration::from_secs(2))
            .probe(&loopback(), port)
            .await;
        assert_eq!(state, PortState::closed(port));
    }
}
