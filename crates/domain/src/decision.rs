use std::net::Ipv4Addr;
use std::sync::Arc;

/// Time-to-live of every locally synthesized answer, in seconds.
pub const LOCAL_ANSWER_TTL: u32 = 60;

/// Outcome of matching one query against a rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Refuse,
    Answer(LocalAnswer),
    Forward,
}

/// An A record synthesized from the override table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalAnswer {
    pub name: Arc<str>,
    pub address: Ipv4Addr,
    pub ttl: u32,
}

impl LocalAnswer {
    pub fn new(name: impl Into<Arc<str>>, address: Ipv4Addr) -> Self {
        Self {
            name: name.into(),
            address,
            ttl: LOCAL_ANSWER_TTL,
        }
    }
}
