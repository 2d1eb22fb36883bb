mod container_runtime;
mod upstream_forwarder;

pub use container_runtime::{ContainerEventSource, ContainerRuntime};
pub use upstream_forwarder::UpstreamForwarder;
