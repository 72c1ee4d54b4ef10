use async_trait::async_trait;
use ruledns_application::ports::UpstreamForwarder;
use ruledns_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{lookup_host, UdpSocket};
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// Relays a query over UDP using a fresh ephemeral socket per call.
///
/// The upstream is resolved on every call, so a hostname upstream follows
/// DNS changes without a restart.
#[derive(Debug, Default, Clone)]
pub struct UdpForwarder;

impl UdpForwarder {
    pub fn new() -> Self {
        Self
    }

    async fn resolve(upstream: &str) -> Result<SocketAddr, DomainError> {
        let mut addrs = lookup_host(upstream)
            .await
            .map_err(|e| DomainError::ForwardFailed {
                upstream: upstream.to_string(),
                reason: format!("cannot resolve upstream: {}", e),
            })?;

        addrs.next().ok_or_else(|| DomainError::ForwardFailed {
            upstream: upstream.to_string(),
            reason: "upstream resolved to no addresses".to_string(),
        })
    }

    async fn exchange(
        server_addr: SocketAddr,
        upstream: &str,
        message_bytes: &[u8],
    ) -> Result<Vec<u8>, DomainError> {
        let failed = |reason: String| DomainError::ForwardFailed {
            upstream: upstream.to_string(),
            reason,
        };

        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr: SocketAddr = if server_addr.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| failed(format!("failed to bind UDP socket: {}", e)))?;

        // Connected sockets only deliver datagrams from the upstream.
        socket
            .connect(server_addr)
            .await
            .map_err(|e| failed(format!("failed to connect UDP socket: {}", e)))?;

        let bytes_sent = socket
            .send(message_bytes)
            .await
            .map_err(|e| failed(format!("send failed: {}", e)))?;

        debug!(server = %server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        loop {
            let bytes_received = socket
                .recv(&mut recv_buf)
                .await
                .map_err(|e| failed(format!("receive failed: {}", e)))?;

            if is_reply_to(message_bytes, &recv_buf[..bytes_received]) {
                recv_buf.truncate(bytes_received);
                debug!(server = %server_addr, bytes_received, "UDP response received");
                return Ok(recv_buf);
            }

            warn!(
                server = %server_addr,
                bytes_received,
                "Discarding UDP datagram that does not answer the query"
            );
        }
    }
}

/// Same transaction ID as the query and the QR bit set.
fn is_reply_to(query: &[u8], reply: &[u8]) -> bool {
    query.len() >= 2 && reply.len() >= 12 && reply[0..2] == query[0..2] && reply[2] & 0x80 != 0
}

#[async_trait]
impl UpstreamForwarder for UdpForwarder {
    async fn forward(
        &self,
        message: &[u8],
        upstream: &str,
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        // One deadline covers resolution, send and receive.
        tokio::time::timeout(timeout, async {
            let server_addr = Self::resolve(upstream).await?;
            Self::exchange(server_addr, upstream, message).await
        })
        .await
        .map_err(|_| DomainError::ForwardTimeout {
            upstream: upstream.to_string(),
        })?
    }
}
