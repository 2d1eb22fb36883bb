use crate::container::{DEFAULT_HOSTNAMES_ENV, DEFAULT_NETWORK};
use crate::entry::CONTAINER_DEFAULT_TTL;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContainersConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_socket_path")]
    pub socket_path: String,

    /// Environment variable holding extra comma separated hostnames.
    #[serde(default = "default_hostnames_env")]
    pub hostnames_env: String,

    /// Network whose address is published for the container.
    #[serde(default = "default_network")]
    pub network: String,

    #[serde(default = "default_ttl")]
    pub ttl: u32,

    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,

    #[serde(default = "default_reconnect_secs")]
    pub reconnect_secs: u64,
}

impl Default for ContainersConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            socket_path: default_socket_path(),
            hostnames_env: default_hostnames_env(),
            network: default_network(),
            ttl: default_ttl(),
            event_buffer: default_event_buffer(),
            reconnect_secs: default_reconnect_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_socket_path() -> String {
    "/var/run/docker.sock".to_string()
}

fn default_hostnames_env() -> String {
    DEFAULT_HOSTNAMES_ENV.to_string()
}

fn default_network() -> String {
    DEFAULT_NETWORK.to_string()
}

fn default_ttl() -> u32 {
    CONTAINER_DEFAULT_TTL
}

fn default_event_buffer() -> usize {
    256
}

fn default_reconnect_secs() -> u64 {
    5
}
