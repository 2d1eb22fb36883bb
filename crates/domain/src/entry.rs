use crate::dns_record::RecordTemplate;
use crate::name_pattern::NamePattern;
use std::sync::Arc;

pub const STATIC_DEFAULT_TTL: u32 = 1800;
pub const CONTAINER_DEFAULT_TTL: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySource {
    /// Operator supplied, loaded once at startup.
    Static,
    /// Derived from a running container.
    Container,
}

impl EntrySource {
    pub fn default_ttl(&self) -> u32 {
        match self {
            EntrySource::Static => STATIC_DEFAULT_TTL,
            EntrySource::Container => CONTAINER_DEFAULT_TTL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntrySource::Static => "static",
            EntrySource::Container => "container",
        }
    }
}

/// Binding of a name pattern to an ordered record set.
///
/// Record order is the order records are written to a response. For
/// container entries `id` is the container id, which is what removal keys on,
/// and the hostname may appear anywhere in the queried name.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: Arc<str>,
    pub pattern: NamePattern,
    pub records: Vec<RecordTemplate>,
    pub source: EntrySource,
}

impl Entry {
    pub fn new_static(
        id: impl Into<Arc<str>>,
        pattern: NamePattern,
        records: Vec<RecordTemplate>,
    ) -> Self {
        Self {
            id: id.into(),
            pattern,
            records,
            source: EntrySource::Static,
        }
    }

    pub fn new_container(
        container_id: impl Into<Arc<str>>,
        hostname: &str,
        records: Vec<RecordTemplate>,
    ) -> Self {
        Self {
            id: container_id.into(),
            pattern: NamePattern::contains(hostname),
            records,
            source: EntrySource::Container,
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.pattern.matches(name)
    }

    pub fn default_ttl(&self) -> u32 {
        self.source.default_ttl()
    }
}
