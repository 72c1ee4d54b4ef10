pub mod ini_rules_persistence;

pub use ini_rules_persistence::IniRulesPersistence;
