pub mod containers;
pub mod dns;

pub use containers::{
    ContainerNaming, RegisterContainerUseCase, SyncContainersUseCase, UnregisterContainerUseCase,
};
pub use dns::ResolveDnsRequestUseCase;
