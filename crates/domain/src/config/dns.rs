use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Path of the INI file holding the persisted rule set
    #[serde(default = "default_rules_path")]
    pub rules_path: String,

    /// Upper bound on a single upstream exchange, in milliseconds
    #[serde(default = "default_forward_timeout_ms")]
    pub forward_timeout_ms: u64,
}

impl DnsConfig {
    pub fn forward_timeout(&self) -> Duration {
        Duration::from_millis(self.forward_timeout_ms)
    }
}

fn default_rules_path() -> String {
    "config.ini".to_string()
}

fn default_forward_timeout_ms() -> u64 {
    2000
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            rules_path: default_rules_path(),
            forward_timeout_ms: default_forward_timeout_ms(),
        }
    }
}
