use crate::services::ConfigStore;
use ruledns_domain::RuleSet;
use std::sync::Arc;

pub struct GetRulesUseCase {
    store: Arc<ConfigStore>,
}

impl GetRulesUseCase {
    pub fn new(store: Arc<ConfigStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> Arc<RuleSet> {
        self.store.snapshot().await
    }
}
