use ruledns_domain::{DomainError, RuleSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire shape of the rule set: `{port, upstream, local_db, blacklist}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesDto {
    /// Wider than `u16` so out-of-range ports reach validation instead of
    /// failing deserialization.
    pub port: i64,
    pub upstream: String,
    #[serde(default)]
    pub local_db: BTreeMap<String, String>,
    #[serde(default)]
    pub blacklist: Vec<String>,
}

impl From<&RuleSet> for RulesDto {
    fn from(rules: &RuleSet) -> Self {
        Self {
            port: i64::from(rules.port),
            upstream: rules.upstream.clone(),
            local_db: rules.local_db.clone(),
            blacklist: rules.blacklist.iter().cloned().collect(),
        }
    }
}

impl TryFrom<RulesDto> for RuleSet {
    type Error = DomainError;

    fn try_from(dto: RulesDto) -> Result<Self, Self::Error> {
        let port = u16::try_from(dto.port)
            .ok()
            .filter(|p| *p != 0)
            .ok_or(DomainError::InvalidPort(dto.port))?;

        Ok(RuleSet {
            port,
            upstream: dto.upstream,
            local_db: dto.local_db,
            blacklist: dto.blacklist.into_iter().collect(),
        })
    }
}
