pub mod config;
pub mod dns;

pub use config::{GetRulesUseCase, ReloadRulesUseCase, UpdateRulesUseCase};
pub use dns::{HandleDnsQueryUseCase, QueryOutcome};
