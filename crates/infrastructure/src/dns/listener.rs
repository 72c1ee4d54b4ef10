use crate::dns::server::DnsServerHandler;
use async_trait::async_trait;
use ruledns_application::ports::{DnsListenerPort, ListenerState, ListenerStatus};
use ruledns_application::services::ConfigStore;
use ruledns_domain::DomainError;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{error, info, warn};

const RECV_BUFFER_SIZE: usize = 4096;
const RECV_ERROR_BACKOFF: Duration = Duration::from_millis(100);

struct RunningListener {
    local_addr: SocketAddr,
    shutdown: CancellationToken,
    tracker: TaskTracker,
    recv_task: JoinHandle<()>,
}

/// Owns the UDP DNS socket and its receive loop.
///
/// Lifecycle transitions are serialized by `running`; `status` is kept
/// separately so it can be read while a transition is in progress.
pub struct DnsListener {
    bind_address: IpAddr,
    store: Arc<ConfigStore>,
    handler: Arc<DnsServerHandler>,
    running: Mutex<Option<RunningListener>>,
    status: RwLock<ListenerStatus>,
}

impl DnsListener {
    pub fn new(
        bind_address: IpAddr,
        store: Arc<ConfigStore>,
        handler: Arc<DnsServerHandler>,
    ) -> Self {
        Self {
            bind_address,
            store,
            handler,
            running: Mutex::new(None),
            status: RwLock::new(ListenerStatus::stopped()),
        }
    }

    async fn set_status(&self, state: ListenerState, local_addr: Option<SocketAddr>) {
        *self.status.write().await = ListenerStatus { state, local_addr };
    }

    async fn start_locked(
        &self,
        running: &mut MutexGuard<'_, Option<RunningListener>>,
    ) -> Result<SocketAddr, DomainError> {
        if let Some(current) = &**running {
            return Ok(current.local_addr);
        }

        self.set_status(ListenerState::Starting, None).await;

        let port = self.store.snapshot().await.port;
        let bind_addr = SocketAddr::new(self.bind_address, port);

        let socket = match create_udp_socket(bind_addr) {
            Ok(socket) => Arc::new(socket),
            Err(e) => {
                error!(bind_address = %bind_addr, error = %e, "Failed to bind DNS listener");
                self.set_status(ListenerState::Stopped, None).await;
                return Err(DomainError::ListenerError(format!(
                    "bind {} failed: {}",
                    bind_addr, e
                )));
            }
        };

        let local_addr = socket.local_addr().unwrap_or(bind_addr);
        let shutdown = CancellationToken::new();
        let tracker = TaskTracker::new();

        let recv_task = tokio::spawn(run_udp_loop(
            socket,
            Arc::clone(&self.handler),
            shutdown.clone(),
            tracker.clone(),
        ));

        **running = Some(RunningListener {
            local_addr,
            shutdown,
            tracker,
            recv_task,
        });

        self.set_status(ListenerState::Running, Some(local_addr)).await;
        info!(local_addr = %local_addr, "DNS listener running");

        Ok(local_addr)
    }

    async fn stop_locked(&self, running: &mut MutexGuard<'_, Option<RunningListener>>) {
        let Some(current) = running.take() else {
            return;
        };

        self.set_status(ListenerState::Stopping, Some(current.local_addr))
            .await;

        current.shutdown.cancel();
        if let Err(e) = current.recv_task.await {
            error!(error = %e, "DNS receive loop ended abnormally");
        }

        // In-flight handlers finish (bounded by the forward timeout) before
        // the last socket handle is released.
        current.tracker.close();
        current.tracker.wait().await;

        self.set_status(ListenerState::Stopped, None).await;
        info!(local_addr = %current.local_addr, "DNS listener stopped");
    }
}

#[async_trait]
impl DnsListenerPort for DnsListener {
    async fn start(&self) -> Result<SocketAddr, DomainError> {
        let mut running = self.running.lock().await;
        self.start_locked(&mut running).await
    }

    async fn stop(&self) {
        let mut running = self.running.lock().await;
        self.stop_locked(&mut running).await;
    }

    async fn restart(&self) -> Result<SocketAddr, DomainError> {
        let mut running = self.running.lock().await;
        self.stop_locked(&mut running).await;
        self.start_locked(&mut running).await
    }

    async fn status(&self) -> ListenerStatus {
        *self.status.read().await
    }
}

async fn run_udp_loop(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
    shutdown: CancellationToken,
    tracker: TaskTracker,
) {
    let mut recv_buf = [0u8; RECV_BUFFER_SIZE];

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            result = socket.recv_from(&mut recv_buf) => {
                let (n, from) = match result {
                    Ok(received) => received,
                    Err(e) if is_transient_recv_error(&e) => continue,
                    Err(e) => {
                        error!(error = %e, "UDP recv error");
                        tokio::select! {
                            _ = shutdown.cancelled() => break,
                            _ = tokio::time::sleep(RECV_ERROR_BACKOFF) => continue,
                        }
                    }
                };

                let query: Arc<[u8]> = Arc::from(&recv_buf[..n]);
                let handler = Arc::clone(&handler);
                let socket = Arc::clone(&socket);
                tracker.spawn(async move {
                    if let Some(response) = handler.handle_raw_udp(&query, from.ip()).await {
                        if let Err(e) = socket.send_to(&response, from).await {
                            warn!(client = %from, error = %e, "Failed to send DNS response");
                        }
                    }
                });
            }
        }
    }
}

/// Errors that say nothing about the socket's health.
fn is_transient_recv_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        // ICMP port-unreachable from an earlier send surfaces as a reset on some platforms.
        io::ErrorKind::Interrupted | io::ErrorKind::ConnectionReset
    )
}

fn create_udp_socket(socket_addr: SocketAddr) -> io::Result<UdpSocket> {
    let socket = Socket::new(
        Domain::for_address(socket_addr),
        Type::DGRAM,
        Some(Protocol::UDP),
    )?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}
