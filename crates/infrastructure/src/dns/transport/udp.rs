//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is, one datagram each way. Truncated replies are
//! returned unchanged.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use dockdns_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn transport_error(&self, action: &str, e: std::io::Error) -> DomainError {
        DomainError::Transport {
            server: self.server_addr.to_string(),
            message: format!("{}: {}", action, e),
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let deadline = Instant::now() + timeout;

        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.transport_error("bind", e))?;

        let bytes_sent =
            tokio::time::timeout_at(deadline, socket.send_to(message_bytes, self.server_addr))
                .await
                .map_err(|_| DomainError::QueryTimeout)?
                .map_err(|e| self.transport_error("send", e))?;

        debug!(server = %self.server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        // Datagrams from anyone but the server, or carrying another message
        // id, are ignored until the deadline.
        loop {
            let (bytes_received, from_addr) =
                tokio::time::timeout_at(deadline, socket.recv_from(&mut recv_buf))
                    .await
                    .map_err(|_| DomainError::QueryTimeout)?
                    .map_err(|e| self.transport_error("receive", e))?;

            if from_addr != self.server_addr {
                warn!(
                    expected = %self.server_addr,
                    received_from = %from_addr,
                    "UDP response from unexpected source"
                );
                continue;
            }

            if !same_message_id(message_bytes, &recv_buf[..bytes_received]) {
                warn!(server = %self.server_addr, "UDP response with mismatched id");
                continue;
            }

            recv_buf.truncate(bytes_received);
            debug!(server = %self.server_addr, bytes_received, "UDP response received");

            return Ok(TransportResponse {
                bytes: recv_buf,
                protocol_used: "UDP",
            });
        }
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}

fn same_message_id(query: &[u8], reply: &[u8]) -> bool {
    query.len() >= 2 && reply.len() >= 2 && query[..2] == reply[..2]
}
