use crate::dns::forwarding::{parse_query, MessageBuilder};
use ruledns_application::use_cases::{HandleDnsQueryUseCase, QueryOutcome};
use ruledns_domain::DnsRequest;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Turns one inbound datagram into at most one reply datagram.
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// `None` means no reply is sent: malformed input or a failed forward.
    pub async fn handle_raw_udp(&self, buf: &[u8], client_ip: IpAddr) -> Option<Vec<u8>> {
        let parsed = match parse_query(buf) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(client = %client_ip, bytes = buf.len(), error = %e, "Dropping malformed datagram");
                return None;
            }
        };

        debug!(
            domain = %parsed.query.domain,
            record_type = %parsed.query.record_type,
            client = %client_ip,
            "DNS query received"
        );

        let request = DnsRequest::new(parsed.query, client_ip, buf);

        let outcome = match self.use_case.execute(&request).await {
            Ok(outcome) => outcome,
            // Already logged by the use case; the client sees silence.
            Err(_) => return None,
        };

        let response = match outcome {
            QueryOutcome::Refused => MessageBuilder::refused(&parsed.message),
            QueryOutcome::Answered(answer) => {
                MessageBuilder::local_answer(&parsed.message, &answer)
            }
            QueryOutcome::Forwarded(reply) => return Some(reply),
        };

        match response {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(domain = %request.query.domain, error = %e, "Failed to build response");
                None
            }
        }
    }
}
