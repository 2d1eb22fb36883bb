pub mod pending_request;
pub mod registry;

pub use pending_request::{PendingHandle, PendingRequest};
pub use registry::Registry;
