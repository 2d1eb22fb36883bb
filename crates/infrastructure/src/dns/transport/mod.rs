pub mod udp;

use async_trait::async_trait;
use dockdns_domain::DomainError;
use std::time::Duration;

pub use udp::UdpTransport;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// Sends one serialized message and waits for one reply, giving up with
    /// `DomainError::QueryTimeout` once `timeout` has passed.
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
