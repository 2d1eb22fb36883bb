use crate::dns_record::RecordTemplate;
use crate::entry::Entry;
use crate::name_pattern::{MatchKind, NamePattern};
use crate::DomainError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StaticEntryConfig {
    #[serde(default)]
    pub id: Option<String>,

    pub domain: String,

    #[serde(default, rename = "match")]
    pub match_kind: MatchKind,

    #[serde(default)]
    pub records: Vec<RecordTemplate>,
}

impl StaticEntryConfig {
    /// `index` names entries that carry no explicit id.
    pub fn to_entry(&self, index: usize) -> Result<Entry, DomainError> {
        let pattern = NamePattern::new(self.match_kind, &self.domain)?;
        for record in &self.records {
            record.validate().map_err(|e| {
                DomainError::InvalidRecord(format!("entry '{}': {}", self.domain, e))
            })?;
        }
        let id = self
            .id
            .clone()
            .unwrap_or_else(|| format!("static-{}", index));
        Ok(Entry::new_static(id, pattern, self.records.clone()))
    }
}
