//! Service settings for RuleDNS
//!
//! These are process-level settings read once at startup. The rule set
//! itself (port, upstream, overrides, blacklist) lives in [`crate::RuleSet`]
//! and is persisted separately.
//! - `root`: Main configuration and CLI overrides
//! - `server`: Web server port and bind address
//! - `dns`: Rules file location and forwarding timeout
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod dns;
pub mod errors;
pub mod logging;
pub mod root;
pub mod server;

pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
