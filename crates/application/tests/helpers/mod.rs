#![allow(dead_code)]
#![allow(unused_imports)]

pub mod builders;
pub mod mock_container_runtime;
pub mod mock_upstream_forwarder;

pub use builders::*;
pub use mock_container_runtime::MockContainerRuntime;
pub use mock_upstream_forwarder::MockUpstreamForwarder;
