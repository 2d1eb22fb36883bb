#![allow(dead_code)]

pub mod dns_server_mock;

pub use dns_server_mock::{MockDnsServer, MockMode};
