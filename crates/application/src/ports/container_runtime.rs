use async_trait::async_trait;
use dockdns_domain::{ContainerDetails, ContainerEvent, DomainError};
use tokio::sync::mpsc;

#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Ids of the containers currently running.
    async fn list_running(&self) -> Result<Vec<String>, DomainError>;

    async fn inspect(&self, id: &str) -> Result<ContainerDetails, DomainError>;
}

#[async_trait]
pub trait ContainerEventSource: Send + Sync {
    /// Pushes start/stop events into `sink` until the underlying stream ends.
    ///
    /// Returns `Ok(())` when the stream closes normally or the receiver is
    /// gone, so callers can decide whether to reconnect.
    async fn stream_events(&self, sink: mpsc::Sender<ContainerEvent>) -> Result<(), DomainError>;
}
