use crate::dns_record::RecordTemplate;
use crate::entry::Entry;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

pub const DEFAULT_HOSTNAMES_ENV: &str = "HOSTNAMES";
pub const DEFAULT_NETWORK: &str = "bridge";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerEventKind {
    Start,
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerEvent {
    pub id: Arc<str>,
    pub kind: ContainerEventKind,
}

impl ContainerEvent {
    pub fn start(id: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            kind: ContainerEventKind::Start,
        }
    }

    pub fn stop(id: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            kind: ContainerEventKind::Stop,
        }
    }
}

/// The parts of a container inspection the resolver cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerDetails {
    pub id: Arc<str>,
    pub name: String,
    pub hostname: String,
    pub domainname: Option<String>,
    pub env: Vec<String>,
    /// Network name to the container's address on it.
    pub networks: HashMap<String, IpAddr>,
}

impl ContainerDetails {
    /// `hostname[.domainname]` followed by every name listed under `env_key`.
    pub fn hostnames(&self, env_key: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();

        let primary = match self.domainname.as_deref().map(str::trim) {
            Some(domain) if !domain.is_empty() => format!("{}.{}", self.hostname.trim(), domain),
            _ => self.hostname.trim().to_string(),
        };
        if !primary.is_empty() {
            names.push(primary);
        }

        let prefix = format!("{}=", env_key);
        for var in &self.env {
            if let Some(list) = var.strip_prefix(&prefix) {
                for host in list.split(',').map(str::trim).filter(|h| !h.is_empty()) {
                    if !names.iter().any(|n| n.eq_ignore_ascii_case(host)) {
                        names.push(host.to_string());
                    }
                }
            }
        }

        names
    }

    pub fn network_ip(&self, network: &str) -> Option<IpAddr> {
        self.networks.get(network).copied()
    }

    /// One single-record entry per hostname, all pointing at `ip`.
    pub fn to_entries(&self, env_key: &str, ip: IpAddr, ttl: u32) -> Vec<Entry> {
        self.hostnames(env_key)
            .iter()
            .map(|hostname| {
                Entry::new_container(
                    Arc::clone(&self.id),
                    hostname,
                    vec![RecordTemplate::address(ip).with_ttl(ttl)],
                )
            })
            .collect()
    }

    pub fn display_name(&self) -> &str {
        let name = self.name.trim_start_matches('/');
        if name.is_empty() {
            &self.id
        } else {
            name
        }
    }
}
