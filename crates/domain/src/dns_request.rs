use super::DnsQuestion;
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct DnsRequest {
    pub client: SocketAddr,
    pub questions: Vec<DnsQuestion>,
}

impl DnsRequest {
    pub fn new(client: SocketAddr, questions: Vec<DnsQuestion>) -> Self {
        Self { client, questions }
    }

    pub fn single(client: SocketAddr, question: DnsQuestion) -> Self {
        Self::new(client, vec![question])
    }
}
