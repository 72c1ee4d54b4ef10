use super::DnsQuery;
use std::net::IpAddr;
use std::sync::Arc;

/// An inbound query together with the original wire message, which is
/// relayed verbatim when the query is forwarded upstream.
#[derive(Debug, Clone)]
pub struct DnsRequest {
    pub query: DnsQuery,
    pub client_ip: IpAddr,
    pub raw: Arc<[u8]>,
}

impl DnsRequest {
    pub fn new(query: DnsQuery, client_ip: IpAddr, raw: impl Into<Arc<[u8]>>) -> Self {
        Self {
            query,
            client_ip,
            raw: raw.into(),
        }
    }
}
