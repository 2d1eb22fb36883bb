use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_DNS_PORT: u16 = 53;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Upstream resolvers, `ip` or `ip:port`. Only the first one is queried.
    #[serde(default = "default_upstream_servers")]
    pub upstream_servers: Vec<String>,

    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Upper bound for a whole request, alias lookups included.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl DnsConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn upstream_addrs(&self) -> Result<Vec<SocketAddr>, ConfigError> {
        self.upstream_servers
            .iter()
            .map(|server| parse_upstream(server))
            .collect()
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            upstream_servers: default_upstream_servers(),
            query_timeout_ms: default_query_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

pub fn parse_upstream(server: &str) -> Result<SocketAddr, ConfigError> {
    let server = server.trim();
    if let Ok(addr) = server.parse::<SocketAddr>() {
        return Ok(addr);
    }
    let ip = server
        .trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .map_err(|_| ConfigError::Validation(format!("Invalid upstream server: {}", server)))?;
    Ok(SocketAddr::new(ip, DEFAULT_DNS_PORT))
}

fn default_upstream_servers() -> Vec<String> {
    vec!["8.8.8.8:53".to_string()]
}

fn default_query_timeout_ms() -> u64 {
    1000
}

fn default_request_timeout_ms() -> u64 {
    5000
}
