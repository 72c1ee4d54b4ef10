use ruledns_application::ports::ListenerStatus;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ServerStatusResponse {
    pub state: &'static str,
    pub port: Option<u16>,
    pub local_addr: Option<String>,
}

impl From<ListenerStatus> for ServerStatusResponse {
    fn from(status: ListenerStatus) -> Self {
        Self {
            state: status.state.as_str(),
            port: status.local_addr.map(|addr| addr.port()),
            local_addr: status.local_addr.map(|addr| addr.to_string()),
        }
    }
}
