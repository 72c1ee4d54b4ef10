//! Harness for end-to-end tests: a full RuleDNS stack on loopback with a
//! mock upstream resolver.

use axum::Router;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use ruledns_api::{create_api_routes, AppState};
use ruledns_application::ports::DnsListenerPort;
use ruledns_application::services::ConfigStore;
use ruledns_application::use_cases::{
    GetRulesUseCase, HandleDnsQueryUseCase, ReloadRulesUseCase, UpdateRulesUseCase,
};
use ruledns_infrastructure::dns::{DnsListener, DnsServerHandler, UdpForwarder};
use ruledns_infrastructure::repositories::IniRulesPersistence;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

pub const UPSTREAM_ANSWER: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);

/// UDP upstream that answers every query with one A record.
pub struct MockUpstream {
    addr: SocketAddr,
    received: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockUpstream {
    pub async fn start() -> std::io::Result<Self> {
        let socket = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let addr = socket.local_addr()?;
        let received = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let counter = Arc::clone(&received);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            let response = Self::answer(&buf[..len]);
                            let _ = socket.send_to(&response, peer).await;
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }

    /// The exact bytes the upstream sends back for `query`.
    pub fn answer(query: &[u8]) -> Vec<u8> {
        if query.len() < 12 {
            return vec![];
        }
        let mut response = Vec::with_capacity(512);
        response.extend_from_slice(&query[0..2]);
        response.extend_from_slice(&[0x81, 0x80]);
        response.extend_from_slice(&query[4..6]);
        response.extend_from_slice(&[0x00, 0x01, 0x00, 0x00, 0x00, 0x00]);
        response.extend_from_slice(&query[12..]);
        response.extend_from_slice(&[
            0xc0, 0x0c, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x01, 0x2c, 0x00, 0x04,
        ]);
        response.extend_from_slice(&UPSTREAM_ANSWER.octets());
        response
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Returns a loopback UDP port that was free a moment ago.
pub async fn free_udp_port() -> u16 {
    let scratch = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    scratch.local_addr().unwrap().port()
}

pub fn rules_ini(port: u16, upstream: SocketAddr, local_db: &[(&str, &str)], blacklist: &[&str]) -> String {
    let mut ini = format!("[server]\nport = {}\nupstream = {}\n\n[local_db]\n", port, upstream);
    for (name, address) in local_db {
        ini.push_str(&format!("{} = {}\n", name, address));
    }
    ini.push_str(&format!("\n[blacklist]\ndomains = {}\n", blacklist.join(", ")));
    ini
}

/// A complete stack wired the same way as the binary.
pub struct TestStack {
    _dir: TempDir,
    pub rules_path: PathBuf,
    pub store: Arc<ConfigStore>,
    pub listener: Arc<DnsListener>,
    pub router: Router,
}

impl TestStack {
    pub async fn start(rules: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let rules_path = dir.path().join("config.ini");
        std::fs::write(&rules_path, rules).unwrap();

        let store = Arc::new(ConfigStore::open(Arc::new(IniRulesPersistence::new(
            &rules_path,
        ))));
        let use_case = Arc::new(
            HandleDnsQueryUseCase::new(store.clone(), Arc::new(UdpForwarder::new()))
                .with_forward_timeout(Duration::from_millis(500)),
        );
        let handler = Arc::new(DnsServerHandler::new(use_case));
        let listener = Arc::new(DnsListener::new(
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            store.clone(),
            handler,
        ));

        let state = AppState {
            get_rules: Arc::new(GetRulesUseCase::new(store.clone())),
            update_rules: Arc::new(UpdateRulesUseCase::new(store.clone(), listener.clone())),
            reload_rules: Arc::new(ReloadRulesUseCase::new(store.clone(), listener.clone())),
            listener: listener.clone(),
        };

        listener.start().await.unwrap();

        Self {
            _dir: dir,
            rules_path,
            store,
            listener,
            router: Router::new().nest("/api", create_api_routes(state)),
        }
    }

    pub async fn dns_addr(&self) -> SocketAddr {
        self.listener.status().await.local_addr.unwrap()
    }

    pub async fn stop(&self) {
        self.listener.stop().await;
    }
}

pub fn query_bytes(id: u16, name: &str, record_type: RecordType) -> Vec<u8> {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    message.add_query(Query::query(Name::from_str(name).unwrap(), record_type));
    message.to_vec().unwrap()
}

/// Sends one datagram and waits briefly for a reply.
pub async fn exchange(server: SocketAddr, query: &[u8]) -> Option<Vec<u8>> {
    let client = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    client.send_to(query, server).await.unwrap();
    let mut buf = vec![0u8; 4096];
    match tokio::time::timeout(Duration::from_millis(1500), client.recv_from(&mut buf)).await {
        Ok(Ok((n, _))) => Some(buf[..n].to_vec()),
        _ => None,
    }
}

pub async fn resolve(server: SocketAddr, id: u16, name: &str, record_type: RecordType) -> Option<Message> {
    let reply = exchange(server, &query_bytes(id, name, record_type)).await?;
    Message::from_vec(&reply).ok()
}
