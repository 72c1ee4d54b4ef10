use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid upstream address: {0}")]
    InvalidUpstream(String),

    #[error("Invalid port: {0}")]
    InvalidPort(i64),

    #[error("Malformed DNS query: {0}")]
    MalformedQuery(String),

    #[error("Forward to {upstream} failed: {reason}")]
    ForwardFailed { upstream: String, reason: String },

    #[error("Forward to {upstream} timed out")]
    ForwardTimeout { upstream: String },

    #[error("Listener error: {0}")]
    ListenerError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Failed to load rules: {0}")]
    RulesLoadFailed(String),
}

impl DomainError {
    /// True for errors caused by the caller's input rather than by the system.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidIpAddress(_)
                | DomainError::InvalidUpstream(_)
                | DomainError::InvalidPort(_)
        )
    }
}
