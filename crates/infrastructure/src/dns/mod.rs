pub mod forwarding;
pub mod server;
pub mod transport;

pub use forwarding::UdpUpstreamForwarder;
pub use server::DnsServerHandler;
