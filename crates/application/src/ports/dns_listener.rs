use async_trait::async_trait;
use ruledns_domain::DomainError;
use std::fmt;
use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Stopped,
    Starting,
    Running,
    Stopping,
}

impl ListenerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListenerState::Stopped => "stopped",
            ListenerState::Starting => "starting",
            ListenerState::Running => "running",
            ListenerState::Stopping => "stopping",
        }
    }
}

impl fmt::Display for ListenerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerStatus {
    pub state: ListenerState,
    pub local_addr: Option<SocketAddr>,
}

impl ListenerStatus {
    pub fn stopped() -> Self {
        Self {
            state: ListenerState::Stopped,
            local_addr: None,
        }
    }
}

/// Lifecycle control of the UDP DNS listener.
#[async_trait]
pub trait DnsListenerPort: Send + Sync {
    /// Binds the port from the current rule set and starts serving.
    /// A bind failure leaves the listener stopped.
    async fn start(&self) -> Result<SocketAddr, DomainError>;

    /// Idempotent. Waits for in-flight queries to finish.
    async fn stop(&self);

    /// `stop()` followed by `start()` against the then-current rule set.
    async fn restart(&self) -> Result<SocketAddr, DomainError>;

    async fn status(&self) -> ListenerStatus;
}
