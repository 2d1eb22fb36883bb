use crate::DomainError;
use fancy_regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

const MAX_PATTERN_LEN: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Unanchored, case-insensitive regular expression search.
    #[default]
    Regex,
    Exact,
    /// The name itself or any subdomain of it.
    Suffix,
    /// Case-insensitive substring, with no regex syntax.
    Contains,
}

/// How an entry's `domain` is compared against a question name.
///
/// All variants compare case-insensitively and ignore a trailing root dot on
/// the question name. Regexes are compiled once, when the entry is built.
#[derive(Clone)]
pub enum NamePattern {
    Exact(Arc<str>),
    Suffix(Arc<str>),
    Contains(Arc<str>),
    Regex {
        source: Arc<str>,
        compiled: Arc<Regex>,
    },
}

impl NamePattern {
    pub fn new(kind: MatchKind, domain: &str) -> Result<Self, DomainError> {
        match kind {
            MatchKind::Exact => Ok(Self::exact(domain)),
            MatchKind::Suffix => Ok(Self::suffix(domain)),
            MatchKind::Contains => Ok(Self::contains(domain)),
            MatchKind::Regex => Self::regex(domain),
        }
    }

    pub fn exact(domain: &str) -> Self {
        NamePattern::Exact(normalize(domain).into())
    }

    pub fn suffix(domain: &str) -> Self {
        NamePattern::Suffix(normalize(domain.trim_start_matches('.')).into())
    }

    pub fn contains(fragment: &str) -> Self {
        NamePattern::Contains(normalize(fragment).into())
    }

    pub fn regex(pattern: &str) -> Result<Self, DomainError> {
        if pattern.is_empty() {
            return Err(DomainError::InvalidPattern(
                "Pattern cannot be empty".to_string(),
            ));
        }
        if pattern.len() > MAX_PATTERN_LEN {
            return Err(DomainError::InvalidPattern(format!(
                "Pattern cannot exceed {} characters",
                MAX_PATTERN_LEN
            )));
        }

        let compiled = Regex::new(&format!("(?i){}", pattern))
            .map_err(|e| DomainError::InvalidPattern(format!("{}: {}", pattern, e)))?;

        Ok(NamePattern::Regex {
            source: pattern.into(),
            compiled: Arc::new(compiled),
        })
    }

    pub fn matches(&self, name: &str) -> bool {
        let name = name.strip_suffix('.').unwrap_or(name);
        match self {
            NamePattern::Exact(domain) => name.eq_ignore_ascii_case(domain),
            NamePattern::Suffix(suffix) => {
                if name.eq_ignore_ascii_case(suffix) {
                    return true;
                }
                let name = name.to_ascii_lowercase();
                name.len() > suffix.len()
                    && name.ends_with(suffix.as_ref())
                    && name.as_bytes()[name.len() - suffix.len() - 1] == b'.'
            }
            NamePattern::Contains(fragment) => {
                name.to_ascii_lowercase().contains(fragment.as_ref())
            }
            // A pattern that exhausts the backtracking budget counts as no match.
            NamePattern::Regex { compiled, .. } => compiled.is_match(name).unwrap_or(false),
        }
    }

    pub fn kind(&self) -> MatchKind {
        match self {
            NamePattern::Exact(_) => MatchKind::Exact,
            NamePattern::Suffix(_) => MatchKind::Suffix,
            NamePattern::Contains(_) => MatchKind::Contains,
            NamePattern::Regex { .. } => MatchKind::Regex,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NamePattern::Exact(domain)
            | NamePattern::Suffix(domain)
            | NamePattern::Contains(domain) => domain,
            NamePattern::Regex { source, .. } => source,
        }
    }
}

impl fmt::Debug for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NamePattern")
            .field(&self.kind())
            .field(&self.as_str())
            .finish()
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for NamePattern {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.as_str() == other.as_str()
    }
}

fn normalize(domain: &str) -> String {
    domain.trim().trim_end_matches('.').to_ascii_lowercase()
}
