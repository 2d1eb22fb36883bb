use serde::{Deserialize, Serialize};

use super::containers::ContainersConfig;
use super::dns::DnsConfig;
use super::entries::StaticEntryConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use crate::entry::Entry;

const LOCAL_CONFIG_PATH: &str = "dockdns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/dockdns/config.toml";

/// Main configuration structure for dockdns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream forwarding configuration
    #[serde(default)]
    pub dns: DnsConfig,

    /// Container discovery configuration
    #[serde(default)]
    pub containers: ContainersConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Operator supplied entries, searched before container entries
    #[serde(default)]
    pub entries: Vec<StaticEntryConfig>,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dockdns.toml in current directory
    /// 3. /etc/dockdns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if !overrides.upstream_servers.is_empty() {
            self.dns.upstream_servers = overrides.upstream_servers;
        }
        if overrides.no_containers {
            self.containers.enabled = false;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.dns.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "query_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.dns.request_timeout_ms < self.dns.query_timeout_ms {
            return Err(ConfigError::Validation(
                "request_timeout_ms cannot be shorter than query_timeout_ms".to_string(),
            ));
        }

        self.dns.upstream_addrs()?;

        if self.containers.enabled && self.containers.event_buffer == 0 {
            return Err(ConfigError::Validation(
                "containers.event_buffer must be greater than 0".to_string(),
            ));
        }

        self.static_entries()?;

        Ok(())
    }

    /// Builds the static registry partition, in file order.
    pub fn static_entries(&self) -> Result<Vec<Entry>, ConfigError> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                entry
                    .to_entry(i)
                    .map_err(|e| ConfigError::Validation(e.to_string()))
            })
            .collect()
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
    pub upstream_servers: Vec<String>,
    pub no_containers: bool,
}
