use crate::ports::UpstreamForwarder;
use crate::services::{ConfigStore, QueryResolver};
use ruledns_domain::{Decision, DnsRequest, DomainError, LocalAnswer};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const DEFAULT_FORWARD_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Refused,
    Answered(LocalAnswer),
    /// Upstream reply, relayed unmodified.
    Forwarded(Vec<u8>),
}

pub struct HandleDnsQueryUseCase {
    store: Arc<ConfigStore>,
    forwarder: Arc<dyn UpstreamForwarder>,
    forward_timeout: Duration,
}

impl HandleDnsQueryUseCase {
    pub fn new(store: Arc<ConfigStore>, forwarder: Arc<dyn UpstreamForwarder>) -> Self {
        Self {
            store,
            forwarder,
            forward_timeout: DEFAULT_FORWARD_TIMEOUT,
        }
    }

    pub fn with_forward_timeout(mut self, timeout: Duration) -> Self {
        self.forward_timeout = timeout;
        self
    }

    #[instrument(skip(self, request), fields(domain = %request.query.domain, record_type = %request.query.record_type))]
    pub async fn execute(&self, request: &DnsRequest) -> Result<QueryOutcome, DomainError> {
        // The lock is released here; forwarding never holds it.
        let rules = self.store.snapshot().await;

        match QueryResolver::decide(&rules, &request.query) {
            Decision::Refuse => {
                debug!(client = %request.client_ip, "Blacklisted, refusing");
                Ok(QueryOutcome::Refused)
            }
            Decision::Answer(answer) => {
                debug!(client = %request.client_ip, address = %answer.address, "Answered from local override");
                Ok(QueryOutcome::Answered(answer))
            }
            Decision::Forward => {
                let upstream = rules.upstream.clone();
                drop(rules);
                debug!(client = %request.client_ip, upstream = %upstream, "Forwarding");
                match self
                    .forwarder
                    .forward(&request.raw, &upstream, self.forward_timeout)
                    .await
                {
                    Ok(reply) => Ok(QueryOutcome::Forwarded(reply)),
                    Err(e) => {
                        warn!(upstream = %upstream, error = %e, "Forward failed");
                        Err(e)
                    }
                }
            }
        }
    }
}
