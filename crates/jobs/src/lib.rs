pub mod container_watcher;
pub mod runner;

pub use container_watcher::ContainerWatcherJob;
pub use runner::JobRunner;
