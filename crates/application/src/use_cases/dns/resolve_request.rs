use crate::ports::UpstreamForwarder;
use crate::services::{PendingHandle, PendingRequest, Registry};
use dockdns_domain::{DnsQuestion, DnsRecord, DnsRequest, DomainError, Entry};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_millis(1000);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(5000);

/// Answers every question of a request from the registry or an upstream.
///
/// Registry hits are materialized inline. Misses and alias targets are
/// forwarded on their own tasks, all joined by one [`PendingRequest`].
pub struct ResolveDnsRequestUseCase {
    registry: Arc<Registry>,
    upstream: Upstream,
    request_timeout: Duration,
}

#[derive(Clone)]
struct Upstream {
    forwarder: Arc<dyn UpstreamForwarder>,
    servers: Arc<[SocketAddr]>,
    timeout: Duration,
}

impl ResolveDnsRequestUseCase {
    pub fn new(
        registry: Arc<Registry>,
        forwarder: Arc<dyn UpstreamForwarder>,
        upstream_servers: Vec<SocketAddr>,
    ) -> Self {
        Self {
            registry,
            upstream: Upstream {
                forwarder,
                servers: upstream_servers.into(),
                timeout: DEFAULT_QUERY_TIMEOUT,
            },
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.upstream.timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub async fn execute(&self, request: &DnsRequest) -> Result<Vec<DnsRecord>, DomainError> {
        let start = Instant::now();
        debug!(
            client = %request.client,
            questions = request.questions.len(),
            "Resolving request"
        );

        let pending = PendingRequest::new();
        for question in &request.questions {
            self.resolve_question(question, pending.handle());
        }

        let result = pending.finish(self.request_timeout).await;

        match &result {
            Ok(records) => debug!(
                client = %request.client,
                answers = records.len(),
                elapsed_us = start.elapsed().as_micros() as u64,
                "Request resolved"
            ),
            Err(e) => error!(client = %request.client, error = %e, "Request failed"),
        }

        result
    }

    fn resolve_question(&self, question: &DnsQuestion, pending: PendingHandle) {
        match self.registry.lookup(&question.name) {
            Some(entry) => self.answer_locally(question, &entry, &pending),
            None => {
                debug!(
                    name = %question.name,
                    record_type = %question.record_type,
                    "Proxying question"
                );
                let upstream = self.upstream.clone();
                let question = question.clone();
                let handle = pending.clone();
                pending.spawn(async move {
                    upstream.forward_into(&question, &handle).await;
                });
            }
        }
    }

    fn answer_locally(&self, question: &DnsQuestion, entry: &Entry, pending: &PendingHandle) {
        debug!(
            name = %question.name,
            entry = %entry.id,
            source = entry.source.as_str(),
            records = entry.records.len(),
            "Local hit"
        );

        let default_ttl = entry.default_ttl();
        for template in &entry.records {
            let record = match template.materialize(&question.name, default_ttl) {
                Ok(record) => record,
                Err(e) => {
                    warn!(entry = %entry.id, error = %e, "Skipping unusable record");
                    continue;
                }
            };

            if let Some(target) = record.alias_target() {
                debug!(name = %question.name, target, "Expanding alias");
                let nested = DnsQuestion::address_of(target);
                let upstream = self.upstream.clone();
                let handle = pending.clone();
                pending.spawn(async move {
                    upstream.forward_into(&nested, &handle).await;
                });
            }

            pending.push(record);
        }
    }
}

impl Upstream {
    async fn forward(&self, question: &DnsQuestion) -> Result<Vec<DnsRecord>, DomainError> {
        // Only the first configured server is consulted.
        let server = *self
            .servers
            .first()
            .ok_or(DomainError::NoUpstreamConfigured)?;

        tokio::time::timeout(
            self.timeout,
            self.forwarder.forward(question, server, self.timeout),
        )
        .await
        .map_err(|_| DomainError::QueryTimeout)?
    }

    async fn forward_into(&self, question: &DnsQuestion, pending: &PendingHandle) {
        match self.forward(question).await {
            Ok(records) => {
                debug!(name = %question.name, records = records.len(), "Upstream answered");
                pending.extend(records);
            }
            Err(e) if e.is_fatal() => {
                error!(name = %question.name, error = %e, "Cannot forward question");
                pending.fail(e);
            }
            Err(DomainError::QueryTimeout) => {
                warn!(
                    name = %question.name,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Upstream query timed out"
                );
            }
            Err(e) => {
                warn!(name = %question.name, error = %e, "Upstream query failed");
            }
        }
    }
}
