//! Mapping between `dockdns_domain::RecordType` and `hickory_proto::rr::RecordType`.
//!
//! Both sides know how to convert to and from the numeric TYPE code, so the
//! mapping goes through it and never loses a type.

use dockdns_domain::RecordType;
use hickory_proto::rr::{DNSClass, RecordType as HickoryRecordType};

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn to_hickory(record_type: &RecordType) -> HickoryRecordType {
        HickoryRecordType::from(record_type.to_u16())
    }

    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        RecordType::from_u16(u16::from(hickory_type))
    }

    pub fn class_to_hickory(class: u16) -> DNSClass {
        DNSClass::from(class)
    }

    pub fn class_from_hickory(class: DNSClass) -> u16 {
        u16::from(class)
    }
}
