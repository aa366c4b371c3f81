// CustView - core/matcher.rs
//
// Query membership test used by the search scan.
// A record matches when the lower-cased query is a substring of its
// lower-cased name, email, or phone.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::Record;

/// A normalised search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    lowered: String,
}

impl Query {
    /// Returns `None` for an empty query (meaning "no active search").
    pub fn new(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            lowered: raw.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.lowered
    }

    /// Check a single record against the query.
    pub fn matches(&self, record: &Record) -> bool {
        contains_lowered(&record.name, &self.lowered)
            || contains_lowered(&record.email, &self.lowered)
            || contains_lowered(&record.phone, &self.lowered)
    }
}

/// Case-insensitive substring test against an already lower-cased needle.
/// ASCII haystacks (the common case) are compared without allocating.
fn contains_lowered(haystack: &str, needle_lower: &str) -> bool {
    if haystack.is_ascii() && needle_lower.is_ascii() {
        let hay = haystack.as_bytes();
        let needle = needle_lower.as_bytes();
        if needle.len() > hay.len() {
            return false;
        }
        return hay
            .windows(needle.len())
            .any(|w| w.iter().zip(needle).all(|(h, n)| h.to_ascii_lowercase() == *n));
    }
    haystack.to_lowercase().contains(needle_lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::source::{RecordSource, SyntheticSource};

    #[test]
    fn test_empty_query_is_none() {
        assert!(Query::new("").is_none());
    }

    #[test]
    fn test_name_match_case_insensitive() {
        let source = SyntheticSource::new(100);
        let q = Query::new("AARAV").unwrap();
        assert!(q.matches(&source.record_at(0)));
        assert!(!q.matches(&source.record_at(1)));
    }

    #[test]
    fn test_email_and_phone_match() {
        let source = SyntheticSource::new(100);
        let r = source.record_at(42);
        assert!(Query::new("@EXAMPLE.com").unwrap().matches(&r));
        assert!(Query::new("9000000042").unwrap().matches(&r));
        assert!(!Query::new("9000000043").unwrap().matches(&r));
    }

    #[test]
    fn test_non_ascii_query_falls_back() {
        let source = SyntheticSource::new(10);
        assert!(!Query::new("Ä").unwrap().matches(&source.record_at(0)));
        assert!(contains_lowered("ÄBC", "äb"));
    }

    #[test]
    fn test_needle_longer_than_haystack() {
        assert!(!contains_lowered("ab", "abc"));
        assert!(contains_lowered("abc", "abc"));
    }
}
