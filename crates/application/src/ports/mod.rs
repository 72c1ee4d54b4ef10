mod dns_listener;
mod rules_persistence;
mod upstream_forwarder;

pub use dns_listener::{DnsListenerPort, ListenerState, ListenerStatus};
pub use rules_persistence::RulesPersistence;
pub use upstream_forwarder::UpstreamForwarder;
