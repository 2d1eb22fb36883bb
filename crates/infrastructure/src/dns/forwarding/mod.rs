pub mod forwarder;
pub mod message_builder;
pub mod record_type_map;
pub mod response_parser;

pub use forwarder::UdpUpstreamForwarder;
pub use message_builder::MessageBuilder;
pub use record_type_map::RecordTypeMapper;
pub use response_parser::{DnsResponse, ResponseParser};
