#![allow(dead_code)]
use dockdns_domain::{ContainerDetails, DnsQuestion, DnsRecord, DnsRequest, RecordType};
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

pub struct ContainerDetailsBuilder {
    id: String,
    name: String,
    hostname: String,
    domainname: Option<String>,
    env: Vec<String>,
    networks: HashMap<String, IpAddr>,
}

impl ContainerDetailsBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: format!("/{}", id),
            hostname: id.to_string(),
            domainname: None,
            env: vec!["PATH=/usr/bin".to_string()],
            networks: HashMap::new(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn hostname(mut self, hostname: &str) -> Self {
        self.hostname = hostname.to_string();
        self
    }

    pub fn domainname(mut self, domainname: &str) -> Self {
        self.domainname = Some(domainname.to_string());
        self
    }

    pub fn env(mut self, var: &str) -> Self {
        self.env.push(var.to_string());
        self
    }

    pub fn network(mut self, network: &str, ip: &str) -> Self {
        self.networks
            .insert(network.to_string(), IpAddr::from_str(ip).unwrap());
        self
    }

    pub fn build(self) -> ContainerDetails {
        ContainerDetails {
            id: self.id.into(),
            name: self.name,
            hostname: self.hostname,
            domainname: self.domainname,
            env: self.env,
            networks: self.networks,
        }
    }
}

pub const CLIENT: &str = "192.168.1.100:40000";

pub fn request(questions: &[(&str, RecordType)]) -> DnsRequest {
    DnsRequest::new(
        CLIENT.parse::<SocketAddr>().unwrap(),
        questions
            .iter()
            .map(|(name, record_type)| DnsQuestion::new(*name, *record_type))
            .collect(),
    )
}

pub fn a_record(name: &str, ip: &str, ttl: u32) -> DnsRecord {
    DnsRecord::address(name, IpAddr::from_str(ip).unwrap(), ttl)
}
