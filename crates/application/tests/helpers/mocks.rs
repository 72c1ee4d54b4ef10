use async_trait::async_trait;
use ruledns_application::ports::{
    DnsListenerPort, ListenerState, ListenerStatus, RulesPersistence, UpstreamForwarder,
};
use ruledns_domain::{DomainError, RuleSet};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// In-memory rules persistence
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryRulesPersistence {
    stored: Arc<Mutex<Option<RuleSet>>>,
    fail_writes: Arc<AtomicBool>,
    saves: Arc<AtomicUsize>,
}

impl InMemoryRulesPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        let persistence = Self::new();
        *persistence.stored.lock().unwrap() = Some(rules);
        persistence
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn stored(&self) -> Option<RuleSet> {
        self.stored.lock().unwrap().clone()
    }

    pub fn overwrite(&self, rules: RuleSet) {
        *self.stored.lock().unwrap() = Some(rules);
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl RulesPersistence for InMemoryRulesPersistence {
    fn load(&self) -> Result<RuleSet, DomainError> {
        self.stored
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| DomainError::RulesLoadFailed("no stored rules".to_string()))
    }

    fn save(&self, rules: &RuleSet) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::IoError("disk full".to_string()));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.stored.lock().unwrap() = Some(rules.clone());
        Ok(())
    }
}

// ============================================================================
// Mock upstream forwarder
// ============================================================================

#[derive(Clone, Default)]
pub struct MockForwarder {
    calls: Arc<Mutex<Vec<(Vec<u8>, String)>>>,
    reply: Arc<Mutex<Vec<u8>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(reply: &[u8]) -> Self {
        let forwarder = Self::new();
        *forwarder.reply.lock().unwrap() = reply.to_vec();
        forwarder
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<(Vec<u8>, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl UpstreamForwarder for MockForwarder {
    async fn forward(
        &self,
        message: &[u8],
        upstream: &str,
        _timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((message.to_vec(), upstream.to_string()));

        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::ForwardTimeout {
                upstream: upstream.to_string(),
            });
        }
        Ok(self.reply.lock().unwrap().clone())
    }
}

// ============================================================================
// Mock DNS listener
// ============================================================================

#[derive(Clone, Default)]
pub struct MockDnsListener {
    restarts: Arc<AtomicUsize>,
    fail_restart: Arc<AtomicBool>,
}

impl MockDnsListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_restart(&self, fail: bool) {
        self.fail_restart.store(fail, Ordering::SeqCst);
    }

    pub fn restart_count(&self) -> usize {
        self.restarts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsListenerPort for MockDnsListener {
    async fn start(&self) -> Result<SocketAddr, DomainError> {
        Ok(SocketAddr::from((Ipv4Addr::LOCALHOST, 5454)))
    }

    async fn stop(&self) {}

    async fn restart(&self) -> Result<SocketAddr, DomainError> {
        self.restarts.fetch_add(1, Ordering::SeqCst);
        if self.fail_restart.load(Ordering::SeqCst) {
            return Err(DomainError::ListenerError("address in use".to_string()));
        }
        self.start().await
    }

    async fn status(&self) -> ListenerStatus {
        ListenerStatus {
            state: ListenerState::Running,
            local_addr: Some(SocketAddr::from((Ipv4Addr::LOCALHOST, 5454))),
        }
    }
}
