pub mod forwarding;
pub mod listener;
pub mod server;
pub mod transport;

pub use listener::DnsListener;
pub use server::DnsServerHandler;
pub use transport::UdpForwarder;
