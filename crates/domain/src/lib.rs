//! dockdns domain layer
pub mod config;
pub mod container;
pub mod dns_question;
pub mod dns_record;
pub mod dns_request;
pub mod entry;
pub mod errors;
pub mod name_pattern;

pub use config::{CliOverrides, Config, ConfigError};
pub use container::{ContainerDetails, ContainerEvent, ContainerEventKind};
pub use dns_question::DnsQuestion;
pub use dns_record::{DnsRecord, RecordData, RecordTemplate, RecordType};
pub use dns_request::DnsRequest;
pub use entry::{Entry, EntrySource, CONTAINER_DEFAULT_TTL, STATIC_DEFAULT_TTL};
pub use errors::DomainError;
pub use name_pattern::{MatchKind, NamePattern};
