pub mod register_container;
pub mod sync_containers;
pub mod unregister_container;

pub use register_container::{ContainerNaming, RegisterContainerUseCase};
pub use sync_containers::SyncContainersUseCase;
pub use unregister_container::UnregisterContainerUseCase;
