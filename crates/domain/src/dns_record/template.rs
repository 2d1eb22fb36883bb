use super::{DnsRecord, RecordData, RecordType};
use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::sync::Arc;

/// Record as stored in a registry entry.
///
/// Templates are shared by every lookup that hits the entry, so they are
/// never written to; [`RecordTemplate::materialize`] produces the per-answer
/// copy with the queried name and an effective TTL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTemplate {
    #[serde(rename = "type")]
    pub record_type: RecordType,

    #[serde(default)]
    pub address: Option<IpAddr>,

    #[serde(default)]
    pub alias_target: Option<Arc<str>>,

    #[serde(default)]
    pub ttl: Option<u32>,
}

impl RecordTemplate {
    pub fn address(address: IpAddr) -> Self {
        let record_type = match address {
            IpAddr::V4(_) => RecordType::A,
            IpAddr::V6(_) => RecordType::AAAA,
        };
        Self {
            record_type,
            address: Some(address),
            alias_target: None,
            ttl: None,
        }
    }

    pub fn alias(target: impl Into<Arc<str>>) -> Self {
        Self {
            record_type: RecordType::CNAME,
            address: None,
            alias_target: Some(target.into()),
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        match self.record_type {
            RecordType::A => match self.address {
                Some(IpAddr::V4(_)) => Ok(()),
                _ => Err(DomainError::InvalidRecord(
                    "A record needs an IPv4 address".to_string(),
                )),
            },
            RecordType::AAAA => match self.address {
                Some(IpAddr::V6(_)) => Ok(()),
                _ => Err(DomainError::InvalidRecord(
                    "AAAA record needs an IPv6 address".to_string(),
                )),
            },
            RecordType::CNAME => match self.alias_target.as_deref() {
                Some(target) if !target.trim().is_empty() => Ok(()),
                _ => Err(DomainError::InvalidRecord(
                    "CNAME record needs an alias_target".to_string(),
                )),
            },
            other => Err(DomainError::InvalidRecord(format!(
                "unsupported local record type {}",
                other
            ))),
        }
    }

    /// Builds the answer record for `name`, falling back to `default_ttl`
    /// when the template carries none.
    pub fn materialize(&self, name: &Arc<str>, default_ttl: u32) -> Result<DnsRecord, DomainError> {
        let ttl = self.ttl.unwrap_or(default_ttl);
        let data = if self.record_type.is_alias() {
            self.alias_target.as_ref().map(|t| RecordData::Alias(Arc::clone(t)))
        } else {
            self.address.map(RecordData::Address)
        }
        .ok_or_else(|| {
            DomainError::InvalidRecord(format!(
                "{} record for {} has no data",
                self.record_type, name
            ))
        })?;

        Ok(DnsRecord {
            name: Arc::clone(name),
            record_type: self.record_type,
            data,
            ttl,
        })
    }
}
