//! dockdns application layer: ports, shared registry and use cases.
pub mod ports;
pub mod services;
pub mod use_cases;
