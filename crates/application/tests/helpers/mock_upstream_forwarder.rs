use async_trait::async_trait;
use dockdns_application::ports::UpstreamForwarder;
use dockdns_domain::{DnsQuestion, DnsRecord, DomainError};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Answers from a per-name table, optionally after a delay.
#[derive(Clone, Default)]
pub struct MockUpstreamForwarder {
    responses: Arc<Mutex<HashMap<String, Vec<DnsRecord>>>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
    errors: Arc<Mutex<HashMap<String, DomainError>>>,
    calls: Arc<Mutex<Vec<(DnsQuestion, SocketAddr)>>>,
}

impl MockUpstreamForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_response(&self, name: &str, records: Vec<DnsRecord>) {
        self.responses
            .lock()
            .unwrap()
            .insert(name.to_ascii_lowercase(), records);
    }

    pub fn set_delay(&self, name: &str, delay: Duration) {
        self.delays
            .lock()
            .unwrap()
            .insert(name.to_ascii_lowercase(), delay);
    }

    pub fn set_error(&self, name: &str, error: DomainError) {
        self.errors
            .lock()
            .unwrap()
            .insert(name.to_ascii_lowercase(), error);
    }

    pub fn calls(&self) -> Vec<(DnsQuestion, SocketAddr)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn was_asked(&self, name: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|(q, _)| q.name.eq_ignore_ascii_case(name))
    }
}

#[async_trait]
impl UpstreamForwarder for MockUpstreamForwarder {
    async fn forward(
        &self,
        question: &DnsQuestion,
        server: SocketAddr,
        _timeout: Duration,
    ) -> Result<Vec<DnsRecord>, DomainError> {
        self.calls.lock().unwrap().push((question.clone(), server));

        let key = question.name.to_ascii_lowercase();
        let delay = self.delays.lock().unwrap().get(&key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.errors.lock().unwrap().get(&key).cloned() {
            return Err(error);
        }

        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }
}
