use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_PORT: u16 = 5454;
pub const DEFAULT_UPSTREAM: &str = "8.8.8.8:53";

/// The active rule set: listen port, upstream resolver, static overrides
/// and blacklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub port: u16,

    pub upstream: String,

    /// Canonical domain name -> address string.
    #[serde(default)]
    pub local_db: BTreeMap<String, String>,

    #[serde(default)]
    pub blacklist: BTreeSet<String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            upstream: DEFAULT_UPSTREAM.to_string(),
            local_db: BTreeMap::new(),
            blacklist: BTreeSet::new(),
        }
    }
}

/// Canonical form used for every name comparison: trimmed, ASCII-lowercased
/// and terminated by exactly one dot.
pub fn canonical_name(name: &str) -> String {
    let mut canonical = name.trim().trim_end_matches('.').to_ascii_lowercase();
    canonical.push('.');
    canonical
}

impl RuleSet {
    /// Rewrites every blacklist entry and override key into canonical form
    /// and drops blank entries.
    pub fn canonicalized(self) -> Self {
        let blacklist = self
            .blacklist
            .iter()
            .filter(|d| !d.trim().is_empty())
            .map(|d| canonical_name(d))
            .collect();

        let local_db = self
            .local_db
            .into_iter()
            .filter(|(name, _)| !name.trim().is_empty())
            .map(|(name, ip)| (canonical_name(&name), ip.trim().to_string()))
            .collect();

        Self {
            port: self.port,
            upstream: self.upstream.trim().to_string(),
            local_db,
            blacklist,
        }
    }

    pub fn is_blacklisted(&self, canonical: &str) -> bool {
        self.blacklist.contains(canonical)
    }

    pub fn override_for(&self, canonical: &str) -> Option<&str> {
        self.local_db.get(canonical).map(String::as_str)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.port == 0 {
            return Err(DomainError::InvalidPort(0));
        }

        parse_upstream(&self.upstream)?;

        for (name, ip) in &self.local_db {
            ip.parse::<IpAddr>().map_err(|_| {
                DomainError::InvalidIpAddress(format!("{} (override for {})", ip, name))
            })?;
        }

        Ok(())
    }
}

/// Splits `host:port` (or `[v6]:port`) into its parts.
///
/// The host is either an IP literal (IPv6 must be bracketed) or a hostname
/// made of letters, digits, `-`, `_` and `.`.
pub fn parse_upstream(upstream: &str) -> Result<(String, u16), DomainError> {
    if let Ok(addr) = upstream.parse::<SocketAddr>() {
        if addr.port() == 0 {
            return Err(DomainError::InvalidUpstream(format!("{} (bad port)", upstream)));
        }
        return Ok((addr.ip().to_string(), addr.port()));
    }

    let (host, port) = upstream
        .rsplit_once(':')
        .ok_or_else(|| DomainError::InvalidUpstream(format!("{} (expected host:port)", upstream)))?;

    if host.is_empty() {
        return Err(DomainError::InvalidUpstream(format!(
            "{} (missing host)",
            upstream
        )));
    }

    if !is_hostname(host) {
        return Err(DomainError::InvalidUpstream(format!(
            "{} (host must be an IP address or hostname; bracket IPv6 addresses)",
            upstream
        )));
    }

    let port = port
        .parse::<u16>()
        .ok()
        .filter(|p| *p != 0)
        .ok_or_else(|| DomainError::InvalidUpstream(format!("{} (bad port)", upstream)))?;

    Ok((host.to_string(), port))
}

fn is_hostname(host: &str) -> bool {
    host.len() <= 253
        && host
            .trim_end_matches('.')
            .split('.')
            .all(|label| {
                !label.is_empty()
                    && label.len() <= 63
                    && !label.starts_with('-')
                    && label
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            })
}
