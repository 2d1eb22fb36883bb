pub mod containers;
pub mod dns;
pub mod entries;
pub mod errors;
pub mod logging;
pub mod root;
pub mod server;

pub use containers::ContainersConfig;
pub use dns::DnsConfig;
pub use entries::StaticEntryConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
