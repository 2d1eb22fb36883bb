use super::RecordType;
use std::net::IpAddr;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    Address(IpAddr),
    Alias(Arc<str>),
}

/// A resource record ready to be written into a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    pub name: Arc<str>,

    pub record_type: RecordType,

    pub data: RecordData,

    pub ttl: u32,
}

impl DnsRecord {
    pub fn address(name: impl Into<Arc<str>>, address: IpAddr, ttl: u32) -> Self {
        let record_type = match address {
            IpAddr::V4(_) => RecordType::A,
            IpAddr::V6(_) => RecordType::AAAA,
        };
        Self {
            name: name.into(),
            record_type,
            data: RecordData::Address(address),
            ttl,
        }
    }

    pub fn alias(name: impl Into<Arc<str>>, target: impl Into<Arc<str>>, ttl: u32) -> Self {
        Self {
            name: name.into(),
            record_type: RecordType::CNAME,
            data: RecordData::Alias(target.into()),
            ttl,
        }
    }

    pub fn ip(&self) -> Option<IpAddr> {
        match self.data {
            RecordData::Address(ip) => Some(ip),
            RecordData::Alias(_) => None,
        }
    }

    pub fn alias_target(&self) -> Option<&str> {
        match &self.data {
            RecordData::Alias(target) => Some(target),
            RecordData::Address(_) => None,
        }
    }
}
