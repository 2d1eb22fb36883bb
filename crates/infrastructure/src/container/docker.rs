//! Docker Engine adapter built on `bollard`.
//!
//! Implements both container ports: inventory/inspection and the lifecycle
//! event stream.

use async_trait::async_trait;
use bollard::container::{InspectContainerOptions, ListContainersOptions};
use bollard::errors::Error as BollardError;
use bollard::models::{ContainerInspectResponse, EventMessage, EventMessageTypeEnum};
use bollard::system::EventsOptions;
use bollard::{Docker, API_DEFAULT_VERSION};
use dockdns_application::ports::{ContainerEventSource, ContainerRuntime};
use dockdns_domain::{ContainerDetails, ContainerEvent, DomainError};
use futures::StreamExt;
use std::collections::HashMap;
use std::net::IpAddr;
use tokio::sync::mpsc;
use tracing::{debug, warn};

const CONNECT_TIMEOUT_SECS: u64 = 120;

pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }

    /// Connects to the engine's unix socket. No request is made until the
    /// first call.
    pub fn connect(socket_path: &str) -> Result<Self, DomainError> {
        let docker =
            Docker::connect_with_socket(socket_path, CONNECT_TIMEOUT_SECS, API_DEFAULT_VERSION)
                .map_err(|e| {
                    DomainError::ContainerRuntime(format!(
                        "Cannot connect to {}: {}",
                        socket_path, e
                    ))
                })?;
        Ok(Self::new(docker))
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn list_running(&self) -> Result<Vec<String>, DomainError> {
        let options = ListContainersOptions::<String> {
            all: false,
            ..Default::default()
        };

        let containers = self
            .docker
            .list_containers(Some(options))
            .await
            .map_err(runtime_error)?;

        Ok(containers.into_iter().filter_map(|c| c.id).collect())
    }

    async fn inspect(&self, id: &str) -> Result<ContainerDetails, DomainError> {
        let response = self
            .docker
            .inspect_container(id, None::<InspectContainerOptions>)
            .await
            .map_err(|e| DomainError::ContainerInspection {
                id: id.to_string(),
                reason: e.to_string(),
            })?;

        Ok(to_details(id, response))
    }
}

#[async_trait]
impl ContainerEventSource for DockerRuntime {
    async fn stream_events(&self, sink: mpsc::Sender<ContainerEvent>) -> Result<(), DomainError> {
        let mut filters = HashMap::new();
        filters.insert("type".to_string(), vec!["container".to_string()]);
        filters.insert(
            "event".to_string(),
            vec!["start".to_string(), "stop".to_string(), "die".to_string()],
        );

        let mut stream = self.docker.events(Some(EventsOptions::<String> {
            filters,
            ..Default::default()
        }));

        while let Some(item) = stream.next().await {
            let message = item.map_err(runtime_error)?;
            let Some(event) = to_event(&message) else {
                continue;
            };
            debug!(id = %event.id, kind = ?event.kind, "Container event");
            if sink.send(event).await.is_err() {
                debug!("Event receiver closed");
                return Ok(());
            }
        }

        Ok(())
    }
}

fn runtime_error(e: BollardError) -> DomainError {
    DomainError::ContainerRuntime(e.to_string())
}

pub(crate) fn to_event(message: &EventMessage) -> Option<ContainerEvent> {
    if message.typ != Some(EventMessageTypeEnum::CONTAINER) {
        return None;
    }
    let id = message.actor.as_ref()?.id.as_deref()?;
    match message.action.as_deref()? {
        "start" => Some(ContainerEvent::start(id)),
        "stop" | "die" => Some(ContainerEvent::stop(id)),
        _ => None,
    }
}

pub(crate) fn to_details(id: &str, response: ContainerInspectResponse) -> ContainerDetails {
    let config = response.config.unwrap_or_default();

    let mut networks = HashMap::new();
    let endpoints = response
        .network_settings
        .and_then(|settings| settings.networks)
        .unwrap_or_default();
    for (network, endpoint) in endpoints {
        let Some(raw) = endpoint.ip_address.filter(|ip| !ip.is_empty()) else {
            continue;
        };
        match raw.parse::<IpAddr>() {
            Ok(ip) => {
                networks.insert(network, ip);
            }
            Err(_) => warn!(
                container = id,
                network = %network,
                address = %raw,
                "Unparsable container address"
            ),
        }
    }

    ContainerDetails {
        id: response.id.as_deref().unwrap_or(id).into(),
        name: response.name.unwrap_or_default(),
        hostname: config.hostname.unwrap_or_default(),
        domainname: config.domainname.filter(|d| !d.is_empty()),
        env: config.env.unwrap_or_default(),
        networks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bollard::models::{ContainerConfig, EndpointSettings, EventActor, NetworkSettings};

    fn event(action: &str, id: &str) -> EventMessage {
        EventMessage {
            typ: Some(EventMessageTypeEnum::CONTAINER),
            action: Some(action.to_string()),
            actor: Some(EventActor {
                id: Some(id.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_lifecycle_events_map_to_start_and_stop() {
        assert_eq!(
            to_event(&event("start", "abc")),
            Some(ContainerEvent::start("abc"))
        );
        assert_eq!(
            to_event(&event("die", "abc")),
            Some(ContainerEvent::stop("abc"))
        );
        assert_eq!(
            to_event(&event("stop", "abc")),
            Some(ContainerEvent::stop("abc"))
        );
        assert_eq!(to_event(&event("pause", "abc")), None);
    }

    #[test]
    fn test_non_container_events_are_ignored() {
        let mut message = event("start", "abc");
        message.typ = Some(EventMessageTypeEnum::NETWORK);
        assert_eq!(to_event(&message), None);
    }

    #[test]
    fn test_inspection_maps_hostnames_env_and_networks() {
        let mut networks = HashMap::new();
        networks.insert(
            "bridge".to_string(),
            EndpointSettings {
                ip_address: Some("172.17.0.2".to_string()),
                ..Default::default()
            },
        );
        networks.insert(
            "none".to_string(),
            EndpointSettings {
                ip_address: Some(String::new()),
                ..Default::default()
            },
        );
        let response = ContainerInspectResponse {
            id: Some("abc123".to_string()),
            name: Some("/web1".to_string()),
            config: Some(ContainerConfig {
                hostname: Some("web1".to_string()),
                domainname: Some(String::new()),
                env: Some(vec!["HOSTNAMES=alt1.local,alt2.local".to_string()]),
                ..Default::default()
            }),
            network_settings: Some(NetworkSettings {
                networks: Some(networks),
                ..Default::default()
            }),
            ..Default::default()
        };

        let details = to_details("abc", response);

        assert_eq!(&*details.id, "abc123");
        assert_eq!(details.display_name(), "web1");
        assert_eq!(details.domainname, None);
        assert_eq!(
            details.network_ip("bridge"),
            Some("172.17.0.2".parse().unwrap())
        );
        assert_eq!(details.network_ip("none"), None);
        assert_eq!(
            details.hostnames("HOSTNAMES"),
            vec!["web1", "alt1.local", "alt2.local"]
        );
    }

    #[test]
    fn test_empty_inspection_falls_back_to_requested_id() {
        let details = to_details("abc", ContainerInspectResponse::default());
        assert_eq!(&*details.id, "abc");
        assert!(details.networks.is_empty());
        assert!(details.hostnames("HOSTNAMES").is_empty());
    }
}
