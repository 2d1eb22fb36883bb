use async_trait::async_trait;
use dockdns_domain::{DnsQuestion, DnsRecord, DomainError};
use std::net::SocketAddr;
use std::time::Duration;

#[async_trait]
pub trait UpstreamForwarder: Send + Sync {
    /// Sends `question` to `server` once and returns the answer and authority
    /// records of the reply that carry an address.
    ///
    /// An unanswered query must end in `DomainError::QueryTimeout` after at
    /// most `timeout`.
    async fn forward(
        &self,
        question: &DnsQuestion,
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<Vec<DnsRecord>, DomainError>;
}
