use ruledns_domain::{DomainError, RuleSet};

/// Port for the persisted representation of the rule set.
pub trait RulesPersistence: Send + Sync {
    fn load(&self) -> Result<RuleSet, DomainError>;

    fn save(&self, rules: &RuleSet) -> Result<(), DomainError>;
}
