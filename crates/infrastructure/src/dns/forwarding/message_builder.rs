//! DNS Message Builder
//!
//! Serializes a single-question recursive query in wire format using
//! `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use dockdns_domain::{DnsQuestion, DomainError};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::Name;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

pub struct MessageBuilder;

impl MessageBuilder {
    /// Builds a query for `question` and returns its random ID together with
    /// the serialized bytes, so the reply can be matched.
    ///
    /// The query has RD set and carries exactly one question.
    pub fn build_query(question: &DnsQuestion) -> Result<(u16, Vec<u8>), DomainError> {
        let mut name = Name::from_utf8(&*question.name).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", question.name, e))
        })?;
        name.set_fqdn(true);

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordTypeMapper::to_hickory(&question.record_type));
        query.set_query_class(RecordTypeMapper::class_to_hickory(question.class));

        let id = fastrand::u16(..);

        let mut message = Message::new();
        message
            .set_id(id)
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(true);
        message.add_query(query);

        let bytes = Self::serialize_message(&message)?;
        Ok((id, bytes))
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDomainName(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
