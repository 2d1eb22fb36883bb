use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid name pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("You need at least one upstream server")]
    NoUpstreamConfigured,

    #[error("Transport error talking to {server}: {message}")]
    Transport { server: String, message: String },

    #[error("Container inspection failed for {id}: {reason}")]
    ContainerInspection { id: String, reason: String },

    #[error("Container runtime error: {0}")]
    ContainerRuntime(String),
}

impl DomainError {
    /// Errors after which no question of the request can make progress.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DomainError::NoUpstreamConfigured)
    }
}
