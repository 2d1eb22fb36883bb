use crate::services::Registry;
use std::sync::Arc;
use tracing::{debug, info};

pub struct UnregisterContainerUseCase {
    registry: Arc<Registry>,
}

impl UnregisterContainerUseCase {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Drops every entry owned by `container_id`. Unknown ids are a no-op.
    pub fn execute(&self, container_id: &str) -> usize {
        let removed = self.registry.remove_container(container_id);
        if removed > 0 {
            info!(id = container_id, removed, "Container unregistered");
        } else {
            debug!(id = container_id, "Stopped container had no entries");
        }
        removed
    }
}
