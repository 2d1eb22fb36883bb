use super::RecordType;
use std::sync::Arc;

pub const CLASS_IN: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub class: u16,
}

impl DnsQuestion {
    pub fn new(name: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
            class: CLASS_IN,
        }
    }

    pub fn with_class(mut self, class: u16) -> Self {
        self.class = class;
        self
    }

    /// The synthetic question issued to resolve an alias target.
    pub fn address_of(target: impl Into<Arc<str>>) -> Self {
        Self::new(target, RecordType::A)
    }
}
