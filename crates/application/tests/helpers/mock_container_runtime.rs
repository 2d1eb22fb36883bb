use async_trait::async_trait;
use dockdns_application::ports::ContainerRuntime;
use dockdns_domain::{ContainerDetails, DomainError};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockContainerRuntime {
    containers: Arc<Mutex<BTreeMap<String, ContainerDetails>>>,
    broken: Arc<Mutex<HashSet<String>>>,
    list_error: Arc<Mutex<Option<DomainError>>>,
}

impl MockContainerRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_containers(containers: Vec<ContainerDetails>) -> Self {
        let runtime = Self::new();
        for container in containers {
            runtime.start(container);
        }
        runtime
    }

    pub fn start(&self, container: ContainerDetails) {
        self.containers
            .lock()
            .unwrap()
            .insert(container.id.to_string(), container);
    }

    pub fn stop(&self, id: &str) {
        self.containers.lock().unwrap().remove(id);
    }

    /// Listed as running, but inspection fails.
    pub fn add_broken(&self, id: &str) {
        self.broken.lock().unwrap().insert(id.to_string());
    }

    pub fn fail_listing(&self, error: DomainError) {
        *self.list_error.lock().unwrap() = Some(error);
    }
}

#[async_trait]
impl ContainerRuntime for MockContainerRuntime {
    async fn list_running(&self) -> Result<Vec<String>, DomainError> {
        if let Some(error) = self.list_error.lock().unwrap().clone() {
            return Err(error);
        }
        let mut ids: Vec<String> = self.containers.lock().unwrap().keys().cloned().collect();
        ids.extend(self.broken.lock().unwrap().iter().cloned());
        Ok(ids)
    }

    async fn inspect(&self, id: &str) -> Result<ContainerDetails, DomainError> {
        if self.broken.lock().unwrap().contains(id) {
            return Err(DomainError::ContainerInspection {
                id: id.to_string(),
                reason: "no such container".to_string(),
            });
        }
        self.containers
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::ContainerInspection {
                id: id.to_string(),
                reason: "no such container".to_string(),
            })
    }
}
