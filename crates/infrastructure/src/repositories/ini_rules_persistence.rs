use ini::Ini;
use ruledns_application::ports::RulesPersistence;
use ruledns_domain::rules::{DEFAULT_PORT, DEFAULT_UPSTREAM};
use ruledns_domain::{DomainError, RuleSet};
use std::path::PathBuf;
use tracing::{debug, warn};

const SERVER_SECTION: &str = "server";
const LOCAL_DB_SECTION: &str = "local_db";
const BLACKLIST_SECTION: &str = "blacklist";

/// Rule set stored as INI:
///
/// ```ini
/// [server]
/// port = 5454
/// upstream = 8.8.8.8:53
///
/// [local_db]
/// myrouter.local = 192.168.1.1
///
/// [blacklist]
/// domains = ads.com, tracker.net
/// ```
pub struct IniRulesPersistence {
    path: PathBuf,
}

impl IniRulesPersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn parse(ini: &Ini) -> RuleSet {
        let mut rules = RuleSet::default();

        if let Some(server) = ini.section(Some(SERVER_SECTION)) {
            if let Some(port) = server.get("port") {
                match port.trim().parse::<u16>() {
                    Ok(p) if p != 0 => rules.port = p,
                    _ => warn!(value = %port, default = DEFAULT_PORT, "Invalid port in rules file"),
                }
            }
            if let Some(upstream) = server.get("upstream").map(str::trim) {
                if upstream.is_empty() {
                    rules.upstream = DEFAULT_UPSTREAM.to_string();
                } else {
                    rules.upstream = upstream.to_string();
                }
            }
        }

        if let Some(local_db) = ini.section(Some(LOCAL_DB_SECTION)) {
            for (name, address) in local_db.iter() {
                rules
                    .local_db
                    .insert(name.to_string(), address.trim().to_string());
            }
        }

        if let Some(blacklist) = ini.section(Some(BLACKLIST_SECTION)) {
            if let Some(domains) = blacklist.get("domains") {
                rules.blacklist = domains
                    .split(',')
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(str::to_string)
                    .collect();
            }
        }

        rules.canonicalized()
    }

    pub fn render(rules: &RuleSet) -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some(SERVER_SECTION))
            .set("port", rules.port.to_string())
            .set("upstream", rules.upstream.as_str());

        for (name, address) in &rules.local_db {
            ini.with_section(Some(LOCAL_DB_SECTION))
                .set(name.as_str(), address.as_str());
        }

        let domains: Vec<&str> = rules.blacklist.iter().map(String::as_str).collect();
        ini.with_section(Some(BLACKLIST_SECTION))
            .set("domains", domains.join(", "));

        ini
    }
}

impl RulesPersistence for IniRulesPersistence {
    fn load(&self) -> Result<RuleSet, DomainError> {
        let ini = Ini::load_from_file(&self.path).map_err(|e| {
            DomainError::RulesLoadFailed(format!("{}: {}", self.path.display(), e))
        })?;
        let rules = Self::parse(&ini);
        debug!(path = %self.path.display(), "Rules loaded");
        Ok(rules)
    }

    fn save(&self, rules: &RuleSet) -> Result<(), DomainError> {
        Self::render(rules)
            .write_to_file(&self.path)
            .map_err(|e| DomainError::IoError(format!("{}: {}", self.path.display(), e)))?;
        debug!(path = %self.path.display(), "Rules saved");
        Ok(())
    }
}
