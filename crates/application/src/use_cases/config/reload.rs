use crate::ports::DnsListenerPort;
use crate::services::ConfigStore;
use ruledns_domain::{DomainError, RuleSet};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Re-reads the persisted rule set and applies it.
pub struct ReloadRulesUseCase {
    store: Arc<ConfigStore>,
    listener: Arc<dyn DnsListenerPort>,
}

impl ReloadRulesUseCase {
    pub fn new(store: Arc<ConfigStore>, listener: Arc<dyn DnsListenerPort>) -> Self {
        Self { store, listener }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<Arc<RuleSet>, DomainError> {
        let _guard = self.store.update_guard().await;

        let rules = match self.store.load_from_persistent_store() {
            Ok(rules) => rules,
            Err(e) => {
                warn!(error = %e, "Reload failed, keeping active rule set");
                return Err(e);
            }
        };

        let applied = self.store.replace(rules).await;

        match self.listener.restart().await {
            Ok(addr) => info!(addr = %addr, "DNS listener restarted"),
            Err(e) => error!(error = %e, "DNS listener failed to restart"),
        }

        Ok(applied)
    }
}
