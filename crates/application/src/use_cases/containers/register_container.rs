use crate::ports::ContainerRuntime;
use crate::services::Registry;
use dockdns_domain::config::ContainersConfig;
use dockdns_domain::container::{DEFAULT_HOSTNAMES_ENV, DEFAULT_NETWORK};
use dockdns_domain::{DomainError, CONTAINER_DEFAULT_TTL};
use std::sync::Arc;
use tracing::{debug, info};

/// How a container's configuration is turned into registry entries.
#[derive(Debug, Clone)]
pub struct ContainerNaming {
    pub hostnames_env: Arc<str>,
    pub network: Arc<str>,
    pub ttl: u32,
}

impl Default for ContainerNaming {
    fn default() -> Self {
        Self {
            hostnames_env: DEFAULT_HOSTNAMES_ENV.into(),
            network: DEFAULT_NETWORK.into(),
            ttl: CONTAINER_DEFAULT_TTL,
        }
    }
}

impl From<&ContainersConfig> for ContainerNaming {
    fn from(config: &ContainersConfig) -> Self {
        Self {
            hostnames_env: config.hostnames_env.as_str().into(),
            network: config.network.as_str().into(),
            ttl: config.ttl,
        }
    }
}

/// Inspects a started container and publishes one entry per hostname.
pub struct RegisterContainerUseCase {
    runtime: Arc<dyn ContainerRuntime>,
    registry: Arc<Registry>,
    naming: ContainerNaming,
}

impl RegisterContainerUseCase {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, registry: Arc<Registry>) -> Self {
        Self {
            runtime,
            registry,
            naming: ContainerNaming::default(),
        }
    }

    pub fn with_naming(mut self, naming: ContainerNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Returns how many entries were published. Any entries the container
    /// already owned are replaced.
    pub async fn execute(&self, container_id: &str) -> Result<usize, DomainError> {
        let details = self.runtime.inspect(container_id).await?;

        let ip = details
            .network_ip(&self.naming.network)
            .ok_or_else(|| DomainError::ContainerInspection {
                id: container_id.to_string(),
                reason: format!("no address on network '{}'", self.naming.network),
            })?;

        let entries = details.to_entries(&self.naming.hostnames_env, ip, self.naming.ttl);
        if entries.is_empty() {
            debug!(container = details.display_name(), "Container has no hostname");
            return Ok(0);
        }

        let hostnames: Vec<&str> = entries.iter().map(|e| e.pattern.as_str()).collect();
        info!(
            container = details.display_name(),
            id = container_id,
            ip = %ip,
            hostnames = ?hostnames,
            "Container registered"
        );

        let count = entries.len();
        self.registry.replace_container(&details.id, entries);
        Ok(count)
    }
}
