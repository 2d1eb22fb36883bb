use super::message_builder::MessageBuilder;
use super::response_parser::{DnsResponse, ResponseParser};
use crate::dns::transport::{DnsTransport, UdpTransport};
use async_trait::async_trait;
use dockdns_application::ports::UpstreamForwarder;
use dockdns_domain::{DnsQuestion, DnsRecord, DomainError};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

/// Forwards one question per call to an upstream resolver over UDP.
#[derive(Debug, Default, Clone, Copy)]
pub struct UdpUpstreamForwarder;

impl UdpUpstreamForwarder {
    pub fn new() -> Self {
        Self
    }

    /// Sends `question` to `server` and returns the parsed reply.
    pub async fn query(
        &self,
        question: &DnsQuestion,
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<DnsResponse, DomainError> {
        let (_, request_bytes) = MessageBuilder::build_query(question)?;

        let transport = UdpTransport::new(server);
        let reply = transport.send(&request_bytes, timeout).await?;
        // The transport only hands back a reply carrying the query's id.
        let response = ResponseParser::parse(&reply.bytes)?;

        debug!(
            server = %server,
            name = %question.name,
            rcode = ResponseParser::rcode_to_status(response.rcode),
            records = response.records.len(),
            protocol = reply.protocol_used,
            "Upstream reply"
        );

        Ok(response)
    }
}

#[async_trait]
impl UpstreamForwarder for UdpUpstreamForwarder {
    async fn forward(
        &self,
        question: &DnsQuestion,
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<Vec<DnsRecord>, DomainError> {
        let response = self.query(question, server, timeout).await?;
        if response.truncated {
            debug!(name = %question.name, "Truncated upstream reply, using partial records");
        }
        Ok(response.records)
    }
}
