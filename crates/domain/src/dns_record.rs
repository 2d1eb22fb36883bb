mod record;
mod record_type;
mod template;

pub use record::{DnsRecord, RecordData};
pub use record_type::RecordType;
pub use template::RecordTemplate;
