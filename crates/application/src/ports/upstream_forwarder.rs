use async_trait::async_trait;
use ruledns_domain::DomainError;
use std::time::Duration;

#[async_trait]
pub trait UpstreamForwarder: Send + Sync {
    /// Relays `message` to `upstream` (`host:port`) and returns the raw reply.
    /// No retries: a failure or timeout is final for the query.
    async fn forward(
        &self,
        message: &[u8],
        upstream: &str,
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError>;
}
