use super::RecordType;
use std::sync::Arc;

/// A single DNS question. `domain` is always in canonical form
/// (see [`crate::canonical_name`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    pub fn new(domain: &str, record_type: RecordType) -> Self {
        Self {
            domain: crate::canonical_name(domain).into(),
            record_type,
        }
    }
}
