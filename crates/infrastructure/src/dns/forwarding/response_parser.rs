use dockdns_domain::{DnsRecord, DomainError};
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::{RData, Record};
use std::net::IpAddr;
use tracing::debug;

/// The parts of an upstream reply the resolver keeps.
#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    /// Address records from the answer and authority sections, in that order.
    pub records: Vec<DnsRecord>,

    /// Records skipped because they carry no address.
    pub dropped: usize,
}

impl DnsResponse {
    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    pub fn is_server_error(&self) -> bool {
        matches!(
            self.rcode,
            ResponseCode::ServFail | ResponseCode::Refused | ResponseCode::NotImp
        )
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        if message.message_type() != MessageType::Response {
            return Err(DomainError::InvalidDnsResponse(
                "QR flag not set on reply".to_string(),
            ));
        }

        let mut records = Vec::new();
        let mut dropped = 0;

        for record in message.answers().iter().chain(message.name_servers()) {
            match Self::to_address_record(record) {
                Some(parsed) => records.push(parsed),
                None => dropped += 1,
            }
        }

        debug!(
            rcode = ?message.response_code(),
            records = records.len(),
            dropped,
            truncated = message.truncated(),
            "DNS response parsed"
        );

        Ok(DnsResponse {
            id: message.id(),
            rcode: message.response_code(),
            truncated: message.truncated(),
            records,
            dropped,
        })
    }

    fn to_address_record(record: &Record) -> Option<DnsRecord> {
        let address = match record.data() {
            RData::A(a) => IpAddr::V4(a.0),
            RData::AAAA(aaaa) => IpAddr::V6(aaaa.0),
            _ => return None,
        };
        let name = record.name().to_utf8();
        let name = name.strip_suffix('.').unwrap_or(&name);
        Some(DnsRecord::address(name, address, record.ttl()))
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
