use crate::ports::DnsListenerPort;
use crate::services::ConfigStore;
use ruledns_domain::{DomainError, RuleSet};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Validate, persist, install, restart. A rejected or unpersistable update
/// leaves the active rule set untouched.
pub struct UpdateRulesUseCase {
    store: Arc<ConfigStore>,
    listener: Arc<dyn DnsListenerPort>,
}

impl UpdateRulesUseCase {
    pub fn new(store: Arc<ConfigStore>, listener: Arc<dyn DnsListenerPort>) -> Self {
        Self { store, listener }
    }

    #[instrument(skip(self, rules))]
    pub async fn execute(&self, rules: RuleSet) -> Result<Arc<RuleSet>, DomainError> {
        let _guard = self.store.update_guard().await;

        let rules = rules.canonicalized();
        if let Err(e) = rules.validate() {
            warn!(error = %e, "Rule set update rejected");
            return Err(e);
        }

        if let Err(e) = self.store.save_to_persistent_store(&rules) {
            error!(error = %e, "Failed to persist rule set");
            return Err(e);
        }

        let applied = self.store.replace(rules).await;

        match self.listener.restart().await {
            Ok(addr) => info!(addr = %addr, "DNS listener restarted"),
            Err(e) => error!(error = %e, "DNS listener failed to restart"),
        }

        Ok(applied)
    }
}
