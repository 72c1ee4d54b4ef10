use crate::ports::RulesPersistence;
use ruledns_domain::{DomainError, RuleSet};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{info, instrument, warn};

/// Single owner of the active rule set.
///
/// Readers take a cheap `Arc` snapshot under the lock and release it
/// immediately, so a snapshot is always one complete rule set. Writers
/// swap the whole `Arc`; there is no partial mutation.
pub struct ConfigStore {
    current: Mutex<Arc<RuleSet>>,
    updates: Mutex<()>,
    persistence: Arc<dyn RulesPersistence>,
}

impl ConfigStore {
    /// Loads the persisted rule set, falling back to defaults if it cannot be read.
    pub fn open(persistence: Arc<dyn RulesPersistence>) -> Self {
        let rules = match persistence.load() {
            Ok(rules) => rules,
            Err(e) => {
                warn!(error = %e, "Rules could not be loaded, starting with defaults");
                RuleSet::default()
            }
        };
        Self::with_rules(rules, persistence)
    }

    pub fn with_rules(rules: RuleSet, persistence: Arc<dyn RulesPersistence>) -> Self {
        Self {
            current: Mutex::new(Arc::new(rules.canonicalized())),
            updates: Mutex::new(()),
            persistence,
        }
    }

    pub async fn snapshot(&self) -> Arc<RuleSet> {
        Arc::clone(&*self.current.lock().await)
    }

    /// Atomically installs `rules` as the active set.
    pub async fn replace(&self, rules: RuleSet) -> Arc<RuleSet> {
        let rules = Arc::new(rules.canonicalized());
        *self.current.lock().await = Arc::clone(&rules);
        info!(
            port = rules.port,
            upstream = %rules.upstream,
            overrides = rules.local_db.len(),
            blacklisted = rules.blacklist.len(),
            "Rule set applied"
        );
        rules
    }

    #[instrument(skip(self))]
    pub fn load_from_persistent_store(&self) -> Result<RuleSet, DomainError> {
        self.persistence.load()
    }

    #[instrument(skip(self, rules))]
    pub fn save_to_persistent_store(&self, rules: &RuleSet) -> Result<(), DomainError> {
        self.persistence.save(rules)
    }

    /// Serializes writers (update / reload) so their persist-replace-restart
    /// sequences never interleave. Readers are not affected.
    pub async fn update_guard(&self) -> MutexGuard<'_, ()> {
        self.updates.lock().await
    }
}
