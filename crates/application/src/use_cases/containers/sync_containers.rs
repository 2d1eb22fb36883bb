use super::RegisterContainerUseCase;
use crate::ports::ContainerRuntime;
use crate::services::Registry;
use dockdns_domain::DomainError;
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// Rebuilds the dynamic partition from the containers running right now.
///
/// Run once before consuming lifecycle events, and again after the event
/// stream reconnects, since events may have been missed in between.
pub struct SyncContainersUseCase {
    runtime: Arc<dyn ContainerRuntime>,
    registry: Arc<Registry>,
    register: Arc<RegisterContainerUseCase>,
}

impl SyncContainersUseCase {
    pub fn new(
        runtime: Arc<dyn ContainerRuntime>,
        registry: Arc<Registry>,
        register: Arc<RegisterContainerUseCase>,
    ) -> Self {
        Self {
            runtime,
            registry,
            register,
        }
    }

    /// Returns the number of containers that produced entries.
    pub async fn execute(&self) -> Result<usize, DomainError> {
        let running = self.runtime.list_running().await?;

        let alive: HashSet<&str> = running.iter().map(String::as_str).collect();
        let stale: HashSet<String> = self
            .registry
            .dynamic_snapshot()
            .iter()
            .filter(|entry| !alive.contains(&*entry.id))
            .map(|entry| entry.id.to_string())
            .collect();
        for id in &stale {
            self.registry.remove_container(id);
        }

        let results = join_all(running.iter().map(|id| self.register.execute(id))).await;

        let mut registered = 0;
        for (id, result) in running.iter().zip(results) {
            match result {
                Ok(0) => {}
                Ok(_) => registered += 1,
                Err(e) => warn!(id = %id, error = %e, "Skipping container"),
            }
        }

        info!(
            running = running.len(),
            registered,
            pruned = stale.len(),
            "Containers synchronized"
        );
        Ok(registered)
    }
}
