//! RuleDNS Domain Layer
pub mod config;
pub mod decision;
pub mod dns_query;
pub mod dns_record;
pub mod dns_request;
pub mod errors;
pub mod rules;

pub use config::{CliOverrides, Config, ConfigError};
pub use decision::{Decision, LocalAnswer, LOCAL_ANSWER_TTL};
pub use dns_query::DnsQuery;
pub use dns_record::RecordType;
pub use dns_request::DnsRequest;
pub use errors::DomainError;
pub use rules::{canonical_name, RuleSet};
