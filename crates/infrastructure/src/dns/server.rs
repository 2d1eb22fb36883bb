use crate::dns::forwarding::RecordTypeMapper;
use dockdns_application::use_cases::ResolveDnsRequestUseCase;
use dockdns_domain::{DnsQuestion, DnsRecord, DnsRequest, DomainError, RecordData};
use hickory_proto::op::{Header, LowerQuery, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA, CNAME};
use hickory_proto::rr::{Name, RData, Record};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Bridges hickory's listener to the resolution use case.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<ResolveDnsRequestUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<ResolveDnsRequestUseCase>) -> Self {
        Self { use_case }
    }
}

#[async_trait::async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        if request.header().op_code() != OpCode::Query {
            warn!(op_code = ?request.header().op_code(), "Unsupported opcode");
            return send_error_response(request, &mut response_handle, ResponseCode::NotImp).await;
        }

        let questions: Vec<DnsQuestion> = request.queries().iter().map(to_question).collect();
        if questions.is_empty() {
            warn!(client = %request.src(), "Request without questions");
            return send_error_response(request, &mut response_handle, ResponseCode::FormErr).await;
        }

        debug!(
            client = %request.src(),
            questions = questions.len(),
            first = %questions[0].name,
            record_type = %questions[0].record_type,
            "DNS query received"
        );

        let dns_request = DnsRequest::new(request.src(), questions);

        let records = match self.use_case.execute(&dns_request).await {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "Query resolution failed");
                return send_error_response(request, &mut response_handle, ResponseCode::ServFail)
                    .await;
            }
        };

        let answers: Vec<Record> = records.iter().filter_map(to_hickory_record).collect();

        debug!(client = %request.src(), answers = answers.len(), "Sending response");

        let builder = MessageResponseBuilder::from_message_request(request);
        let mut header = Header::response_from_request(request.header());
        header.set_recursion_available(true);
        let response = builder.build(header, answers.iter(), &[], &[], &[]);

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to send response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

/// Keeps the client's spelling of the name, minus the root dot.
pub(crate) fn to_question(query: &LowerQuery) -> DnsQuestion {
    let name = query.original().name().to_utf8();
    let name = name.strip_suffix('.').unwrap_or(&name);
    DnsQuestion::new(name, RecordTypeMapper::from_hickory(query.query_type()))
        .with_class(RecordTypeMapper::class_from_hickory(query.query_class()))
}

pub(crate) fn to_hickory_record(record: &DnsRecord) -> Option<Record> {
    let name = match parse_name(&record.name) {
        Ok(name) => name,
        Err(e) => {
            warn!(name = %record.name, error = %e, "Dropping record with invalid owner name");
            return None;
        }
    };

    let rdata = match &record.data {
        RecordData::Address(IpAddr::V4(ip)) => RData::A(A(*ip)),
        RecordData::Address(IpAddr::V6(ip)) => RData::AAAA(AAAA(*ip)),
        RecordData::Alias(target) => match parse_name(target) {
            Ok(target) => RData::CNAME(CNAME(target)),
            Err(e) => {
                warn!(target = %target, error = %e, "Dropping alias with invalid target");
                return None;
            }
        },
    };

    Some(Record::from_rdata(name, record.ttl, rdata))
}

fn parse_name(name: &str) -> Result<Name, DomainError> {
    let mut parsed = Name::from_utf8(name)
        .map_err(|e| DomainError::InvalidDomainName(format!("{}: {}", name, e)))?;
    parsed.set_fqdn(true);
    Ok(parsed)
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "Sending error response");
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = Header::response_from_request(request.header());
    header.set_response_code(code);
    header.set_recursion_available(true);
    let response = builder.build_no_records(header);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send error response");
            ResponseInfo::from(*request.header())
        }
    }
}
